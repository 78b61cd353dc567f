use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use throbber_widgets_tui::WhichUse::Spin;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::Theme;
use crate::ui::Component;

/// Inline loading indicator, rendered left-aligned in the given area.
pub struct Spinner {
    throbber_state: ThrobberState,
    label: Option<String>,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            throbber_state: ThrobberState::default(),
            label: None,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Columns needed to draw the throbber plus its label.
    pub fn width(&self) -> u16 {
        // The throbber itself uses 1-character width, +1 for the gap before the label
        let label = self.label.as_ref().map_or(0, |l| l.chars().count() + 1);
        u16::try_from(label + 1).unwrap_or(u16::MAX)
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Spinner {
    type Output = ();

    fn handle_tick(&mut self) {
        self.throbber_state.calc_next();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut throbber = Throbber::default()
            .throbber_set(BRAILLE_SIX)
            .use_type(Spin)
            .throbber_style(Style::default().fg(theme.lavender()))
            .style(
                Style::default()
                    .fg(theme.green())
                    .add_modifier(Modifier::BOLD),
            );

        if let Some(label) = &self.label {
            throbber = throbber.label(label.clone());
        }

        let area = Rect {
            width: self.width().min(area.width),
            height: area.height.min(1),
            ..area
        };

        frame.render_stateful_widget(throbber, area, &mut self.throbber_state);
    }
}
