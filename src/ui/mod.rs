//! UI building blocks for the TUI.
//!
//! - [`Component`] - Reusable, interactive UI building blocks
//! - [`Handled`] - Result of handling an input event
//! - [`TextInput`], [`Spinner`], [`ToastManager`] - concrete components

mod component;
mod spinner;
mod text_input;
mod toast;

pub use component::Component;
pub use spinner::Spinner;
pub use text_input::{TextInput, TextInputEvent};
pub use toast::{Toast, ToastManager, ToastType};

/// Result type alias for UI operations.
pub type Result<T> = std::result::Result<T, color_eyre::Report>;

/// Result of handling an input event.
///
/// This enum represents the three possible outcomes of handling a key event:
/// - `Ignored` - The handler didn't recognize or handle this input
/// - `Consumed` - The input was handled but produced no message
/// - `Event(E)` - The input was handled and produced a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> Handled<E> {
    /// Returns true if the input was consumed (not ignored).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Returns the event if present.
    pub fn event(self) -> Option<E> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the event type using the provided function.
    pub fn map<F, U>(self, f: F) -> Handled<U>
    where
        F: FnOnce(E) -> U,
    {
        match self {
            Self::Ignored => Handled::Ignored,
            Self::Consumed => Handled::Consumed,
            Self::Event(e) => Handled::Event(f(e)),
        }
    }
}

impl<E> From<E> for Handled<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}
