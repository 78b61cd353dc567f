use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::ui::{Component, Handled, Result};

/// Event emitted by [`TextInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// The value was edited.
    Changed,
    /// User pressed Enter.
    Submitted,
    /// User pressed Esc.
    Cancelled,
}

/// A single-line text input rendered inline (one row).
///
/// The cursor is tracked as a character index so multi-byte input edits
/// cleanly.
pub struct TextInput {
    value: String,
    cursor: usize,
    placeholder: Option<String>,
    focused: bool,
}

impl TextInput {
    pub const fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: None,
            focused: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete_char_at_cursor(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete_word_before_cursor(&mut self) -> bool {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1] == ' ' {
            pos -= 1;
        }
        while pos > 0 && chars[pos - 1] != ' ' {
            pos -= 1;
        }
        if pos == self.cursor {
            return false;
        }
        let (start, end) = (self.byte_index(pos), self.byte_index(self.cursor));
        self.value.drain(start..end);
        self.cursor = pos;
        true
    }

    fn clear_line(&mut self) -> bool {
        let changed = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        changed
    }

    fn edited(changed: bool) -> Handled<TextInputEvent> {
        if changed {
            TextInputEvent::Changed.into()
        } else {
            Handled::Consumed
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TextInput {
    type Output = TextInputEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        Ok(match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => TextInputEvent::Submitted.into(),
            (KeyCode::Esc, _) => TextInputEvent::Cancelled.into(),

            (KeyCode::Backspace, KeyModifiers::ALT) => {
                let changed = self.delete_word_before_cursor();
                Self::edited(changed)
            }
            (KeyCode::Backspace, _) => {
                let changed = self.delete_char_before_cursor();
                Self::edited(changed)
            }
            (KeyCode::Delete, _) => {
                let changed = self.delete_char_at_cursor();
                Self::edited(changed)
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = self.clear_line();
                Self::edited(changed)
            }

            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Consumed
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                Handled::Consumed
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                Handled::Consumed
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_len();
                Handled::Consumed
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                TextInputEvent::Changed.into()
            }

            // Leave unknown chords to the parent (drawer shortcuts, field navigation)
            _ => Handled::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let display: Vec<char> = self.value.chars().collect();

        let input_style = Style::default().fg(theme.text());
        let cursor_style = Style::default()
            .fg(theme.base())
            .bg(theme.text())
            .add_modifier(Modifier::BOLD);
        let placeholder_style = Style::default().fg(theme.overlay0());

        let line = match (&self.placeholder, display.is_empty()) {
            (Some(placeholder), true) => {
                let mut spans = Vec::with_capacity(2);
                if self.focused {
                    spans.push(Span::styled(" ", cursor_style));
                }
                spans.push(Span::styled(placeholder.clone(), placeholder_style));
                Line::from(spans)
            }
            _ if self.focused => {
                let before: String = display[..self.cursor].iter().collect();
                let cursor_char = display.get(self.cursor).copied().unwrap_or(' ');
                let after: String = display.iter().skip(self.cursor + 1).collect();
                Line::from(vec![
                    Span::styled(before, input_style),
                    Span::styled(cursor_char.to_string(), cursor_style),
                    Span::styled(after, input_style),
                ])
            }
            _ => Line::from(Span::styled(display.iter().collect::<String>(), input_style)),
        };

        let style = if self.focused {
            Style::default().bg(theme.surface0())
        } else {
            Style::default().bg(theme.mantle())
        };

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
