//! Backer information step rendering

use crate::logo;
use crate::ui::wizard::WizardScreen;
use crate::wizard::Wizard;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_backer_step(&mut self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(2)])
            .split(area);

        self.render_fields(frame, chunks[0], wizard);

        let step3 = &wizard.state().step3;
        let mut lines = Vec::new();

        if step3.has_backer {
            let logo_line = match logo::describe(&step3.backer.logo) {
                Some(label) => Line::from(vec![
                    Span::styled("Logo: ", Style::default().fg(Color::Gray)),
                    Span::styled(label, Style::default().fg(Color::Green)),
                ]),
                None => Line::from(Span::styled(
                    "Logo: none",
                    Style::default().fg(Color::DarkGray),
                )),
            };
            lines.push(logo_line);
        }

        if wizard.is_submitting() {
            lines.push(Line::from(Span::styled(
                "Creating your bounty...",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }
}
