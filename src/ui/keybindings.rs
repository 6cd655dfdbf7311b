//! Keyboard shortcuts of the wizard TUI.
//!
//! Single source of truth for both key dispatch and the footer hints.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::Step;

/// What a shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextField,
    PrevField,
    /// Next step, or submit on the last one
    Next,
    Back,
    JumpTo(Step),
    CreateAnother,
}

/// Screens with their own shortcut set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// A step form
    Form,
    /// Confirmation and result views
    Submitted,
}

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
    pub description: &'static str,
    pub context: ShortcutContext,
}

impl Shortcut {
    /// Format key for display (e.g., "Ctrl+n", "Tab")
    pub fn key_display(&self) -> String {
        let key = format_keycode(&self.key);
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key)
        } else {
            key
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        // Shift arrives with BackTab and upper-case chars, so it is not compared
        let relevant = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        self.key == event.code && self.modifiers == relevant
    }
}

fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", key),
    }
}

const fn shortcut(
    key: KeyCode,
    modifiers: KeyModifiers,
    action: Action,
    description: &'static str,
    context: ShortcutContext,
) -> Shortcut {
    Shortcut {
        key,
        modifiers,
        action,
        description,
        context,
    }
}

const NONE: KeyModifiers = KeyModifiers::NONE;
const CTRL: KeyModifiers = KeyModifiers::CONTROL;

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    shortcut(KeyCode::Tab, NONE, Action::NextField, "next field", ShortcutContext::Form),
    shortcut(KeyCode::BackTab, NONE, Action::PrevField, "previous field", ShortcutContext::Form),
    shortcut(KeyCode::Char('n'), CTRL, Action::Next, "next / submit", ShortcutContext::Form),
    shortcut(KeyCode::Char('b'), CTRL, Action::Back, "back", ShortcutContext::Form),
    shortcut(KeyCode::F(1), NONE, Action::JumpTo(Step::One), "step 1", ShortcutContext::Form),
    shortcut(KeyCode::F(2), NONE, Action::JumpTo(Step::Two), "step 2", ShortcutContext::Form),
    shortcut(KeyCode::F(3), NONE, Action::JumpTo(Step::Three), "step 3", ShortcutContext::Form),
    shortcut(KeyCode::Esc, NONE, Action::Quit, "quit", ShortcutContext::Form),
    shortcut(KeyCode::Char('c'), CTRL, Action::Quit, "quit", ShortcutContext::Form),
    shortcut(KeyCode::Char('n'), NONE, Action::CreateAnother, "create another", ShortcutContext::Submitted),
    shortcut(KeyCode::Char('q'), NONE, Action::Quit, "quit", ShortcutContext::Submitted),
    shortcut(KeyCode::Esc, NONE, Action::Quit, "quit", ShortcutContext::Submitted),
    shortcut(KeyCode::Char('c'), CTRL, Action::Quit, "quit", ShortcutContext::Submitted),
];

/// Shortcut bound to `event` in `context`
pub fn action_for(context: ShortcutContext, event: &KeyEvent) -> Option<Action> {
    SHORTCUTS
        .iter()
        .find(|s| s.context == context && s.matches(event))
        .map(|s| s.action)
}

/// Shortcuts for the footer, one per action
pub fn hints(context: ShortcutContext) -> Vec<&'static Shortcut> {
    let mut seen: Vec<Action> = Vec::new();
    SHORTCUTS
        .iter()
        .filter(|s| s.context == context)
        .filter(|s| {
            if seen.contains(&s.action) {
                false
            } else {
                seen.push(s.action);
                true
            }
        })
        .collect()
}
