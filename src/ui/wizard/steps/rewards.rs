//! Rewards & timeline step rendering

use crate::form::{max_impact_points, per_winner_amount, Choice, MAX_SDGS};
use crate::ui::wizard::WizardScreen;
use crate::wizard::Wizard;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_rewards_step(&mut self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(34)])
            .split(area);

        self.render_fields(frame, chunks[0], wizard);

        let step2 = &wizard.state().step2;
        let currency = step2
            .reward
            .currency
            .map(|c| c.as_str())
            .unwrap_or_default();
        let remaining = MAX_SDGS.saturating_sub(step2.sdgs.len());

        let value_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let note_style = Style::default().fg(Color::Gray);

        let lines = vec![
            Line::from(Span::styled("Reward per winner", note_style)),
            Line::from(Span::styled(
                format!("{} {:.2}", currency, per_winner_amount(&step2.reward)),
                value_style,
            )),
            Line::from(""),
            Line::from(Span::styled("Maximum impact points allocated", note_style)),
            Line::from(Span::styled(
                max_impact_points(step2).to_string(),
                value_style,
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} selections remaining", remaining),
                if remaining == 0 {
                    Style::default().fg(Color::Red)
                } else {
                    note_style
                },
            )),
        ];

        let summary = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Summary ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(summary, chunks[1]);
    }
}
