//! Controlled input widgets for the wizard forms.
//!
//! Widgets hold only what the user is typing; the screen reads their value
//! after each consumed key and reports it to the wizard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// Visible rows of a multi-select list
const MULTI_SELECT_ROWS: u16 = 6;

/// What a key did to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The value changed
    Changed,
    /// Consumed without touching the value (cursor movement, full input)
    Moved,
    /// Not handled by this field
    Ignored,
}

impl KeyOutcome {
    fn changed_if(changed: bool) -> Self {
        if changed {
            KeyOutcome::Changed
        } else {
            KeyOutcome::Moved
        }
    }
}

/// A single form input
pub enum FormField {
    /// Single-line text input
    TextInput {
        value: String,
        /// Cursor position in chars
        cursor: usize,
        placeholder: String,
        max_chars: Option<usize>,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
    /// One option or the placeholder (`selected == None`)
    Select {
        options: Vec<String>,
        selected: Option<usize>,
        placeholder: String,
    },
    /// Any number of checked options
    MultiSelect {
        options: Vec<String>,
        checked: Vec<bool>,
        list_state: ListState,
    },
    /// Boolean checkbox
    Toggle { value: bool, label: String },
    /// Digits, optionally with one decimal point; kept as typed
    NumberInput {
        value: String,
        decimal: bool,
        placeholder: String,
    },
    /// Date input (YYYY-MM-DD format)
    DateInput { value: String, cursor: usize },
}

fn byte_index(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map_or(value.len(), |(i, _)| i)
}

impl FormField {
    pub fn text(value: &str, placeholder: &str, max_chars: Option<usize>) -> Self {
        FormField::TextInput {
            cursor: value.chars().count(),
            value: value.to_string(),
            placeholder: placeholder.to_string(),
            max_chars,
        }
    }

    pub fn text_area(value: &str, placeholder: &str) -> Self {
        let mut textarea = TextArea::default();
        textarea.insert_str(value);
        FormField::TextArea {
            textarea: Box::new(textarea),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn select(options: Vec<String>, selected: Option<usize>, placeholder: &str) -> Self {
        FormField::Select {
            options,
            selected,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn multi_select(options: Vec<String>, checked_indices: &[usize]) -> Self {
        let checked = (0..options.len())
            .map(|i| checked_indices.contains(&i))
            .collect();
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        FormField::MultiSelect {
            options,
            checked,
            list_state,
        }
    }

    pub fn toggle(value: bool, label: &str) -> Self {
        FormField::Toggle {
            value,
            label: label.to_string(),
        }
    }

    pub fn number(value: &str, decimal: bool, placeholder: &str) -> Self {
        FormField::NumberInput {
            value: value.to_string(),
            decimal,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn date(value: &str) -> Self {
        FormField::DateInput {
            cursor: value.chars().count(),
            value: value.to_string(),
        }
    }

    /// Text of text-like fields; empty for the others
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. }
            | FormField::NumberInput { value, .. }
            | FormField::DateInput { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
            FormField::Select {
                options, selected, ..
            } => selected
                .and_then(|i| options.get(i).cloned())
                .unwrap_or_default(),
            FormField::MultiSelect { .. } | FormField::Toggle { .. } => String::new(),
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self {
            FormField::Select { selected, .. } => *selected,
            _ => None,
        }
    }

    pub fn checked_indices(&self) -> Vec<usize> {
        match self {
            FormField::MultiSelect { checked, .. } => checked
                .iter()
                .enumerate()
                .filter_map(|(i, on)| on.then_some(i))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, FormField::Toggle { value: true, .. })
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match self {
            FormField::TextInput {
                value,
                cursor,
                max_chars,
                ..
            } => edit_line(value, cursor, *max_chars, key.code, |_| true),
            FormField::DateInput { value, cursor } => {
                edit_line(value, cursor, Some(10), key.code, |c| {
                    c.is_ascii_digit() || c == '-'
                })
            }
            FormField::TextArea { textarea, .. } => {
                if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
                    return KeyOutcome::Ignored;
                }
                KeyOutcome::changed_if(textarea.input(key))
            }
            FormField::Select {
                options, selected, ..
            } => {
                let len = options.len();
                let before = *selected;
                match key.code {
                    KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                        *selected = match before {
                            None if len > 0 => Some(0),
                            Some(i) if i + 1 < len => Some(i + 1),
                            other => other,
                        };
                    }
                    KeyCode::Left | KeyCode::Up => {
                        *selected = before.and_then(|i| i.checked_sub(1)).or(before);
                    }
                    _ => return KeyOutcome::Ignored,
                }
                KeyOutcome::changed_if(*selected != before)
            }
            FormField::MultiSelect {
                options,
                checked,
                list_state,
            } => {
                let len = options.len();
                let current = list_state.selected().unwrap_or(0);
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        list_state.select(Some(current.saturating_sub(1)));
                        KeyOutcome::Moved
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        list_state.select(Some((current + 1).min(len.saturating_sub(1))));
                        KeyOutcome::Moved
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => match checked.get_mut(current) {
                        Some(flag) => {
                            *flag = !*flag;
                            KeyOutcome::Changed
                        }
                        None => KeyOutcome::Moved,
                    },
                    _ => KeyOutcome::Ignored,
                }
            }
            FormField::Toggle { value, .. } => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    *value = !*value;
                    KeyOutcome::Changed
                }
                _ => KeyOutcome::Ignored,
            },
            FormField::NumberInput { value, decimal, .. } => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    value.push(c);
                    KeyOutcome::Changed
                }
                KeyCode::Char('.') if *decimal && !value.contains('.') => {
                    value.push('.');
                    KeyOutcome::Changed
                }
                KeyCode::Backspace => KeyOutcome::changed_if(value.pop().is_some()),
                _ => KeyOutcome::Ignored,
            },
        }
    }

    /// Rows needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextArea { .. } => 4,
            FormField::MultiSelect { options, .. } => {
                (options.len() as u16).min(MULTI_SELECT_ROWS)
            }
            _ => 1,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let text_style = Style::default().fg(if focused { Color::White } else { Color::Gray });
        let hint_style = Style::default().fg(Color::DarkGray);

        match self {
            FormField::TextInput {
                value,
                cursor,
                placeholder,
                max_chars,
            } => {
                let count = value.chars().count();
                let suffix = max_chars
                    .map(|m| format!(" ({}/{})", count, m))
                    .unwrap_or_default();
                let line = if value.is_empty() && !focused {
                    Line::from(Span::styled(placeholder.as_str(), hint_style))
                } else {
                    let mut shown = value.clone();
                    if focused {
                        shown.insert(byte_index(value, *cursor), '|');
                    }
                    Line::from(vec![Span::raw(shown), Span::styled(suffix, hint_style)])
                };
                frame.render_widget(Paragraph::new(line).style(text_style), area);
            }
            FormField::DateInput { value, cursor } => {
                let line = if value.is_empty() && !focused {
                    Line::from(Span::styled("YYYY-MM-DD", hint_style))
                } else {
                    let mut shown = value.clone();
                    if focused {
                        shown.insert(byte_index(value, *cursor), '|');
                    }
                    Line::from(shown)
                };
                frame.render_widget(Paragraph::new(line).style(text_style), area);
            }
            FormField::NumberInput {
                value, placeholder, ..
            } => {
                let line = if value.is_empty() && !focused {
                    Line::from(Span::styled(placeholder.as_str(), hint_style))
                } else if focused {
                    Line::from(format!("{}|", value))
                } else {
                    Line::from(value.as_str())
                };
                frame.render_widget(Paragraph::new(line).style(text_style), area);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(Block::default().borders(Borders::LEFT).border_style(
                    Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }),
                ));
                textarea.set_placeholder_text(placeholder.clone());
                textarea.set_placeholder_style(hint_style);
                frame.render_widget(&**textarea, area);
            }
            FormField::Select {
                options,
                selected,
                placeholder,
            } => {
                let current = selected
                    .and_then(|i| options.get(i))
                    .map(|s| Span::styled(s.as_str(), text_style.add_modifier(Modifier::BOLD)))
                    .unwrap_or_else(|| Span::styled(placeholder.as_str(), hint_style));
                let arrows = if focused { Color::Cyan } else { Color::DarkGray };
                let line = Line::from(vec![
                    Span::styled("< ", Style::default().fg(arrows)),
                    current,
                    Span::styled(" >", Style::default().fg(arrows)),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
            FormField::MultiSelect {
                options,
                checked,
                list_state,
            } => {
                let items: Vec<ListItem> = options
                    .iter()
                    .zip(checked.iter())
                    .map(|(opt, on)| {
                        let (mark, style) = if *on {
                            ("[x] ", Style::default().fg(Color::Green))
                        } else {
                            ("[ ] ", Style::default().fg(Color::Gray))
                        };
                        ListItem::new(Line::from(vec![
                            Span::styled(mark, style),
                            Span::styled(opt.as_str(), style),
                        ]))
                    })
                    .collect();

                let highlight = if focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let list = List::new(items)
                    .highlight_style(highlight)
                    .highlight_symbol(if focused { "> " } else { "  " });
                frame.render_stateful_widget(list, area, list_state);
            }
            FormField::Toggle { value, label } => {
                let mark = if *value { "[x]" } else { "[ ]" };
                let mark_style = if *value {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let line = Line::from(vec![
                    Span::styled(mark, mark_style),
                    Span::raw(" "),
                    Span::styled(label.as_str(), text_style),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
        }
    }
}

/// Shared line editing for text and date inputs
fn edit_line(
    value: &mut String,
    cursor: &mut usize,
    max_chars: Option<usize>,
    key: KeyCode,
    accept: impl Fn(char) -> bool,
) -> KeyOutcome {
    let len = value.chars().count();
    match key {
        KeyCode::Char(c) if accept(c) => {
            if max_chars.map_or(true, |m| len < m) {
                value.insert(byte_index(value, *cursor), c);
                *cursor += 1;
                KeyOutcome::Changed
            } else {
                KeyOutcome::Moved
            }
        }
        KeyCode::Backspace => {
            if *cursor == 0 {
                return KeyOutcome::Moved;
            }
            *cursor -= 1;
            value.remove(byte_index(value, *cursor));
            KeyOutcome::Changed
        }
        KeyCode::Delete => {
            if *cursor >= len {
                return KeyOutcome::Moved;
            }
            value.remove(byte_index(value, *cursor));
            KeyOutcome::Changed
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
            KeyOutcome::Moved
        }
        KeyCode::Right => {
            *cursor = (*cursor + 1).min(len);
            KeyOutcome::Moved
        }
        KeyCode::Home => {
            *cursor = 0;
            KeyOutcome::Moved
        }
        KeyCode::End => {
            *cursor = len;
            KeyOutcome::Moved
        }
        _ => KeyOutcome::Ignored,
    }
}

/// Key event without modifiers, for tests and synthetic input
pub fn plain(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
