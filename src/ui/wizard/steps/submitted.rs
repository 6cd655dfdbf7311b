//! Confirmation and result views

use crate::ui::centered_rect;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::wizard::{render_hints, WizardScreen};
use crate::wizard::Wizard;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn card(frame: &mut Frame, area: Rect, value: String, title: &str, caption: &str) {
    let text = vec![
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(title.to_string())),
        Line::from(Span::styled(
            caption.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

impl WizardScreen {
    pub(crate) fn render_confirmation(&self, frame: &mut Frame) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Bounty Created Successfully!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Your bounty has been submitted. Redirecting to results..."),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
    }

    pub(crate) fn render_result(&self, frame: &mut Frame, wizard: &Wizard) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(5),    // Payload
                Constraint::Length(5), // Cards
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Bounty Details",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Here's the complete data for your created bounty"),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let Some(payload) = wizard.payload() else {
            render_hints(frame, chunks[3], ShortcutContext::Submitted);
            return;
        };

        let json = match payload.to_pretty_json() {
            Ok(json) => json,
            Err(e) => format!("Failed to render payload: {}", e),
        };
        let payload_view = Paragraph::new(json)
            .block(
                Block::default()
                    .title(" Generated Payload ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.result_scroll, 0));
        frame.render_widget(payload_view, chunks[1]);

        let summary = payload.summary();
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(chunks[2]);
        card(frame, cards[0], summary.winners.to_string(), "Winners", "Selected");
        card(
            frame,
            cards[1],
            format!("{} {}", summary.currency, summary.amount),
            "Total Reward",
            "Amount",
        );
        card(frame, cards[2], summary.sdg_count.to_string(), "SDGs", "Aligned");

        render_hints(frame, chunks[3], ShortcutContext::Submitted);
    }
}
