//! Step sidebar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form::{furthest_reachable, Step};
use crate::wizard::Wizard;

/// How a step appears in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    Current,
    Complete,
    Open,
    Locked,
}

impl StepMarker {
    pub fn for_step(wizard: &Wizard, step: Step) -> Self {
        if wizard.current_step() == Some(step) {
            StepMarker::Current
        } else if !wizard.can_jump_to(step) {
            StepMarker::Locked
        } else if step.validate(wizard.state()).is_valid() {
            StepMarker::Complete
        } else {
            StepMarker::Open
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            StepMarker::Current => ">",
            StepMarker::Complete => "✓",
            StepMarker::Open => "○",
            StepMarker::Locked => "·",
        }
    }

    fn style(&self) -> Style {
        match self {
            StepMarker::Current => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            StepMarker::Complete => Style::default().fg(Color::Green),
            StepMarker::Open => Style::default().fg(Color::White),
            StepMarker::Locked => Style::default().fg(Color::DarkGray),
        }
    }
}

/// Footer line showing how far the gate currently reaches
pub fn progress_label(wizard: &Wizard) -> String {
    let furthest = furthest_reachable(wizard.state());
    format!("Unlocked {}/{}", furthest.number(), Step::all().len())
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "Create Bounty",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![Line::from("")];
    for step in Step::all() {
        let marker = StepMarker::for_step(wizard, *step);
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker.symbol()), marker.style()),
            Span::styled(format!("F{} ", step.number()), Style::default().fg(Color::DarkGray)),
            Span::styled(step.title(), marker.style()),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(" {}", progress_label(wizard)),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::form::{BountyType, DominantCore};
    use crate::wizard::FieldChange;

    #[test]
    fn test_markers_follow_gate() {
        let mut wizard = Wizard::default();
        assert_eq!(StepMarker::for_step(&wizard, Step::One), StepMarker::Current);
        assert_eq!(StepMarker::for_step(&wizard, Step::Two), StepMarker::Locked);

        wizard.apply(FieldChange::Title("T".to_string()));
        wizard.apply(FieldChange::Description("D".to_string()));
        wizard.apply(FieldChange::BountyType(Some(BountyType::Design)));
        wizard.apply(FieldChange::DominantCore(Some(DominantCore::Water)));
        assert_eq!(StepMarker::for_step(&wizard, Step::Two), StepMarker::Open);
        assert_eq!(StepMarker::for_step(&wizard, Step::Three), StepMarker::Locked);

        wizard.next(Instant::now());
        assert_eq!(StepMarker::for_step(&wizard, Step::One), StepMarker::Complete);
    }

    #[test]
    fn test_progress_follows_furthest_reachable() {
        let mut wizard = Wizard::default();
        assert_eq!(progress_label(&wizard), "Unlocked 1/3");

        wizard.apply(FieldChange::Title("T".to_string()));
        wizard.apply(FieldChange::Description("D".to_string()));
        wizard.apply(FieldChange::BountyType(Some(BountyType::Design)));
        wizard.apply(FieldChange::DominantCore(Some(DominantCore::Water)));
        assert_eq!(progress_label(&wizard), "Unlocked 2/3");
    }
}
