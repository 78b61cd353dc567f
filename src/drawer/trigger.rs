//! Trigger binding.
//!
//! A [`Trigger`] is the caller-supplied activation element: a labelled key
//! binding that may carry its own activation handler. Binding it to a drawer
//! composes an open request after that handler instead of replacing it.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::config::KeyBinding;

/// Handler already attached to a trigger element.
pub type ActivateFn = Box<dyn FnMut() + Send>;

/// Activation element supplied by the drawer's owner.
pub struct Trigger {
    label: String,
    binding: KeyBinding,
    on_activate: Option<ActivateFn>,
}

impl Trigger {
    pub fn new(label: impl Into<String>, binding: KeyBinding) -> Self {
        Self {
            label: label.into(),
            binding,
            on_activate: None,
        }
    }

    /// Attach the element's own activation handler.
    #[must_use]
    pub fn on_activate(mut self, on_activate: impl FnMut() + Send + 'static) -> Self {
        self.on_activate = Some(Box::new(on_activate));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A trigger whose activation also requests the drawer to open.
pub struct BoundTrigger {
    element: Trigger,
}

/// Bind an optional trigger element.
///
/// Without an element no binding exists and the owner opens the drawer
/// programmatically.
pub fn bind_trigger(element: Option<Trigger>) -> Option<BoundTrigger> {
    element.map(|element| BoundTrigger { element })
}

impl BoundTrigger {
    /// Whether `key` activates this trigger.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.element.binding.matches(key)
    }

    /// Run the element's own handler. The caller follows up with the open
    /// request.
    pub fn activate(&mut self) {
        if let Some(on_activate) = &mut self.element.on_activate {
            on_activate();
        }
    }

    /// Draw the trigger as a key hint, e.g. `[n] Configure CDN`.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_style = Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::styled(format!("[{}]", self.element.binding.display()), key_style),
            Span::raw(" "),
            Span::styled(self.element.label(), Style::default().fg(theme.text())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
