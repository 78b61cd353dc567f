//! Panel action footer: Cancel and Ok.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::ui::{Component, Spinner};

/// Presentation overrides for a footer action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonProps {
    pub disabled: bool,
}

impl ButtonProps {
    pub const fn disabled() -> Self {
        Self { disabled: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterAction {
    Cancel,
    Ok,
}

/// Labels, key hints and state of the two footer actions.
pub struct Footer {
    cancel_text: String,
    ok_text: String,
    cancel_props: ButtonProps,
    ok_props: ButtonProps,
    cancel_key: String,
    ok_key: String,
    spinner: Spinner,
}

impl Footer {
    pub fn new(cancel_key: impl Into<String>, ok_key: impl Into<String>) -> Self {
        Self {
            cancel_text: "Cancel".to_string(),
            ok_text: "Ok".to_string(),
            cancel_props: ButtonProps::default(),
            ok_props: ButtonProps::default(),
            cancel_key: cancel_key.into(),
            ok_key: ok_key.into(),
            spinner: Spinner::new(),
        }
    }

    pub fn set_cancel_text(&mut self, text: impl Into<String>) {
        self.cancel_text = text.into();
    }

    pub fn set_ok_text(&mut self, text: impl Into<String>) {
        self.ok_text = text.into();
    }

    pub const fn set_cancel_props(&mut self, props: ButtonProps) {
        self.cancel_props = props;
    }

    pub const fn set_ok_props(&mut self, props: ButtonProps) {
        self.ok_props = props;
    }

    /// Whether `action` can currently fire.
    pub const fn is_enabled(&self, action: FooterAction, pending: bool) -> bool {
        match action {
            FooterAction::Cancel => !self.cancel_props.disabled && !pending,
            // A pending Ok stays enabled; the coordinator drops the repeat
            FooterAction::Ok => !self.ok_props.disabled,
        }
    }

    pub fn handle_tick(&mut self) {
        self.spinner.handle_tick();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, pending: bool) {
        let key_style = Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD);
        let disabled_style = Style::default().fg(theme.overlay0());

        let cancel_style = if self.is_enabled(FooterAction::Cancel, pending) {
            Style::default().fg(theme.subtext0()).add_modifier(Modifier::BOLD)
        } else {
            disabled_style
        };
        let ok_style = if self.is_enabled(FooterAction::Ok, pending) {
            Style::default().fg(theme.green()).add_modifier(Modifier::BOLD)
        } else {
            disabled_style
        };

        let mut spans = vec![
            Span::styled(format!("[{}]", self.cancel_key), key_style),
            Span::raw(" "),
            Span::styled(self.cancel_text.clone(), cancel_style),
            Span::raw("    "),
            Span::styled(format!("[{}]", self.ok_key), key_style),
            Span::raw(" "),
        ];

        // Ok shows its loading indicator for the whole pending span
        if pending {
            self.spinner.set_label(self.ok_text.clone());
            let hint_width: usize = spans.iter().map(Span::width).sum();
            let hint_width = u16::try_from(hint_width).unwrap_or(u16::MAX);
            let spinner_width = self.spinner.width();
            let start = area.x + area.width.saturating_sub(hint_width + spinner_width);
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(start, area.y, hint_width.min(area.width), 1),
            );
            let spinner_area = Rect::new(start + hint_width, area.y, spinner_width, 1);
            self.spinner
                .render(frame, spinner_area.intersection(area), theme);
        } else {
            spans.push(Span::styled(self.ok_text.clone(), ok_style));
            frame.render_widget(
                Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
                area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_disabled_while_pending() {
        let footer = Footer::new("ctrl+x", "ctrl+s");
        assert!(footer.is_enabled(FooterAction::Cancel, false));
        assert!(!footer.is_enabled(FooterAction::Cancel, true));
        assert!(footer.is_enabled(FooterAction::Ok, true));
    }

    #[test]
    fn test_button_props_disable_actions() {
        let mut footer = Footer::new("ctrl+x", "ctrl+s");
        footer.set_ok_props(ButtonProps::disabled());
        footer.set_cancel_props(ButtonProps::disabled());
        assert!(!footer.is_enabled(FooterAction::Ok, false));
        assert!(!footer.is_enabled(FooterAction::Cancel, false));
    }
}
