//! Wizard screen: step forms, sidebar and the submitted views

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::form::{Step, StoreEvent};
use crate::logo;
use crate::ui::form_field::{FormField, KeyOutcome};
use crate::ui::keybindings::{action_for, hints, Action, ShortcutContext};
use crate::ui::sidebar::render_sidebar;
use crate::wizard::{ApplyOutcome, FieldChange, NextOutcome, Route, Wizard};

pub mod fields;
mod steps;

pub use fields::FieldId;

#[cfg(test)]
mod tests;

/// Width of the step sidebar
const SIDEBAR_WIDTH: u16 = 30;

/// Outcome of a key press on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenResult {
    Continue,
    Quit,
}

/// One-line message under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

pub struct WizardScreen {
    /// Widgets of the step on screen
    pub(crate) widgets: BTreeMap<FieldId, FormField>,
    /// Index into the visible fields
    pub(crate) focus: usize,
    pub(crate) status: Option<Status>,
    /// Scroll offset of the payload on the result view
    pub(crate) result_scroll: u16,
    synced_route: Option<Route>,
    /// Set by the store subscription when the form is reset
    reset_pending: Rc<Cell<bool>>,
    logo_max_bytes: u64,
}

impl WizardScreen {
    pub fn new(wizard: &mut Wizard, logo_max_bytes: u64) -> Self {
        let reset_pending = Rc::new(Cell::new(false));
        let flag = Rc::clone(&reset_pending);
        wizard.subscribe(move |event, _| {
            if *event == StoreEvent::Reset {
                flag.set(true);
            }
        });

        let mut screen = Self {
            widgets: BTreeMap::new(),
            focus: 0,
            status: None,
            result_scroll: 0,
            synced_route: None,
            reset_pending,
            logo_max_bytes,
        };
        screen.sync(wizard);
        screen
    }

    /// Rebuild widgets from the store after a route change or reset.
    ///
    /// Widgets are left alone otherwise so partial input such as `1.` survives.
    pub fn sync(&mut self, wizard: &Wizard) {
        let route = wizard.route();
        let reset = self.reset_pending.replace(false);
        if !reset && self.synced_route == Some(route) {
            return;
        }

        self.widgets.clear();
        self.focus = 0;
        self.result_scroll = 0;
        if let Some(step) = route.step() {
            let state = wizard.state();
            for id in FieldId::of_step(step) {
                self.widgets.insert(*id, id.widget(state));
            }
        }
        self.synced_route = Some(route);
        tracing::debug!(%route, reset, "synced widgets");
    }

    /// Fields currently shown, in focus order
    pub fn visible_fields(&self, wizard: &Wizard) -> Vec<FieldId> {
        match wizard.current_step() {
            Some(step) => FieldId::visible(step, wizard.state()),
            None => Vec::new(),
        }
    }

    pub fn focused_field(&self, wizard: &Wizard) -> Option<FieldId> {
        let visible = self.visible_fields(wizard);
        let last = visible.len().checked_sub(1)?;
        visible.get(self.focus.min(last)).copied()
    }

    pub fn handle_key(&mut self, wizard: &mut Wizard, key: KeyEvent, now: Instant) -> ScreenResult {
        let context = if wizard.route().is_submitted() {
            ShortcutContext::Submitted
        } else {
            ShortcutContext::Form
        };

        match action_for(context, &key) {
            Some(Action::Quit) => return ScreenResult::Quit,
            Some(action) => self.run_action(wizard, action, now),
            None if context == ShortcutContext::Form => self.edit_focused(wizard, key),
            None => self.scroll_result(key.code),
        }

        self.sync(wizard);
        ScreenResult::Continue
    }

    /// Called after the wizard's timers moved the route
    pub fn on_tick(&mut self, wizard: &Wizard, fired: Option<Route>) {
        if fired.is_some() {
            self.status = None;
        }
        self.sync(wizard);
    }

    fn run_action(&mut self, wizard: &mut Wizard, action: Action, now: Instant) {
        let count = self.visible_fields(wizard).len().max(1);
        match action {
            Action::NextField => self.focus = (self.focus.min(count - 1) + 1) % count,
            Action::PrevField => self.focus = (self.focus.min(count - 1) + count - 1) % count,
            Action::Next => {
                self.status = match wizard.next(now) {
                    NextOutcome::Advanced(_) => None,
                    NextOutcome::Invalid => {
                        Some(Status::error("Please fix the highlighted fields"))
                    }
                    NextOutcome::SubmissionStarted => Some(Status::info("Creating your bounty...")),
                    NextOutcome::AlreadySubmitting | NextOutcome::Ignored => self.status.take(),
                };
            }
            Action::Back => {
                if wizard.back() {
                    self.status = None;
                }
            }
            Action::JumpTo(step) => {
                if wizard.current_step() != Some(step) && !wizard.go_to(step) {
                    self.status = Some(Status::error(format!(
                        "Complete the previous steps to open step {}",
                        step.number()
                    )));
                } else {
                    self.status = None;
                }
            }
            Action::CreateAnother => {
                if wizard.route() == Route::Result {
                    wizard.create_another();
                    self.status = None;
                }
            }
            Action::Quit => {}
        }
    }

    fn edit_focused(&mut self, wizard: &mut Wizard, key: KeyEvent) {
        let Some(id) = self.focused_field(wizard) else {
            return;
        };
        if id == FieldId::BackerLogo && key.code == KeyCode::Enter {
            self.load_logo(wizard);
            return;
        }

        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        // Cursor movement is not an edit and must not clear the field's error
        if widget.handle_key(key) != KeyOutcome::Changed {
            return;
        }
        let Some(change) = id.change(widget) else {
            return;
        };

        match wizard.apply(change) {
            ApplyOutcome::Applied => {
                if self.status.as_ref().is_some_and(|s| s.is_error) {
                    self.status = None;
                }
            }
            ApplyOutcome::Rejected => {
                // Toggle the item back
                widget.handle_key(key);
                self.status = Some(Status::error("You can select up to 4 SDGs"));
            }
            ApplyOutcome::Blocked => {
                self.widgets.insert(id, id.widget(wizard.state()));
                self.status = Some(Status::info("Creating your bounty..."));
            }
            ApplyOutcome::Inactive => {}
        }
    }

    fn load_logo(&mut self, wizard: &mut Wizard) {
        let path = self
            .widgets
            .get(&FieldId::BackerLogo)
            .map(|w| w.value())
            .unwrap_or_default();
        let path = path.trim();

        if path.is_empty() {
            wizard.apply(FieldChange::BackerLogo(String::new()));
            self.status = Some(Status::info("Logo removed"));
            return;
        }

        match logo::read_logo(path, self.logo_max_bytes) {
            Ok(data_uri) => {
                let label = logo::describe(&data_uri).unwrap_or_default();
                if wizard.apply(FieldChange::BackerLogo(data_uri)) == ApplyOutcome::Applied {
                    self.status = Some(Status::info(format!("Loaded logo {}", label)));
                }
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to load backer logo");
                self.status = Some(Status::error(e.to_string()));
            }
        }
    }

    fn scroll_result(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_scroll = self.result_scroll.saturating_sub(1)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.result_scroll = self.result_scroll.saturating_add(1)
            }
            KeyCode::Home | KeyCode::Char('g') => self.result_scroll = 0,
            _ => {}
        }
    }

    /// Render the whole screen for the current route
    pub fn render(&mut self, frame: &mut Frame, wizard: &Wizard) {
        match wizard.route() {
            Route::Step(step) => self.render_step(frame, wizard, step),
            Route::Confirmation => self.render_confirmation(frame),
            Route::Result => self.render_result(frame, wizard),
        }
    }

    fn render_step(&mut self, frame: &mut Frame, wizard: &Wizard, step: Step) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)])
            .split(frame.area());

        render_sidebar(frame, columns[0], wizard);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Heading
                Constraint::Min(5),    // Fields
                Constraint::Length(1), // Status
                Constraint::Length(1), // Key hints
            ])
            .split(columns[1]);

        let (title, subtitle) = match step {
            Step::One => (
                "Basic Details",
                "Let's start with the essential information about your bounty",
            ),
            Step::Two => (
                "Rewards & Timeline",
                "Define the reward structure and project timeline",
            ),
            Step::Three => (
                "Backer Information",
                "Optional backer details and final confirmation",
            ),
        };
        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
        ]);
        frame.render_widget(heading, rows[0]);

        match step {
            Step::One => self.render_basics_step(frame, rows[1], wizard),
            Step::Two => self.render_rewards_step(frame, rows[1], wizard),
            Step::Three => self.render_backer_step(frame, rows[1], wizard),
        }

        if let Some(status) = &self.status {
            let color = if status.is_error {
                Color::Red
            } else {
                Color::Green
            };
            frame.render_widget(
                Paragraph::new(Span::styled(status.text.as_str(), Style::default().fg(color))),
                rows[2],
            );
        }

        render_hints(frame, rows[3], ShortcutContext::Form);
    }

    /// Lay out the visible fields top to bottom, scrolled to keep focus on screen
    pub(crate) fn render_fields(&mut self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        let Some(step) = wizard.current_step() else {
            return;
        };
        let visible = self.visible_fields(wizard);
        if visible.is_empty() {
            return;
        }
        let focus = self.focus.min(visible.len() - 1);

        // Label row + widget + error row
        let heights: Vec<u16> = visible
            .iter()
            .map(|id| 2 + self.widgets.get(id).map_or(1, FormField::render_height))
            .collect();

        let mut start = 0;
        while start < focus && heights[start..=focus].iter().sum::<u16>() > area.height {
            start += 1;
        }

        let mut y = area.y;
        for (id, height) in visible.iter().zip(heights.iter()).skip(start) {
            if y + height > area.y + area.height {
                break;
            }
            let focused = visible[focus] == *id;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(id.label(), label_style)),
                Rect::new(area.x, y, area.width, 1),
            );

            let widget_height = height - 2;
            if let Some(widget) = self.widgets.get_mut(id) {
                widget.render(
                    frame,
                    Rect::new(area.x + 2, y + 1, area.width.saturating_sub(2), widget_height),
                    focused,
                );
            }

            if let Some(error) = id.error_field().and_then(|f| wizard.error_for(step, f)) {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        error.to_string(),
                        Style::default().fg(Color::Red),
                    )),
                    Rect::new(area.x + 2, y + 1 + widget_height, area.width.saturating_sub(2), 1),
                );
            }

            y += height;
        }
    }
}

/// Footer line listing the shortcuts of `context`
pub(crate) fn render_hints(frame: &mut Frame, area: Rect, context: ShortcutContext) {
    let mut spans = Vec::new();
    for (i, shortcut) in hints(context).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  |  "));
        }
        spans.push(Span::styled(
            shortcut.key_display(),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::raw(format!(" {}", shortcut.description)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
