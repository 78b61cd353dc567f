//! Controllable open/closed state.
//!
//! The drawer reads and writes its visibility through [`OpenState`], which
//! is either owned by the drawer ([`UncontrolledOpen`]) or mirrored from an
//! owner ([`ControlledOpen`]).

use tokio::sync::watch;

/// Change notification invoked with the requested visibility.
pub type OpenChangeFn = Box<dyn FnMut(bool) + Send>;

/// Read/write surface over the drawer's visibility.
///
/// Requests for the value already held are no-ops: they neither notify nor
/// cause a transition.
pub trait OpenState: Send {
    /// Current visibility.
    fn get(&self) -> bool;

    /// Request a visibility change.
    fn set(&mut self, next: bool);

    /// Whether an owner drives the value.
    fn is_controlled(&self) -> bool {
        false
    }
}

/// Visibility owned by the drawer itself.
pub struct UncontrolledOpen {
    open: bool,
    on_change: Option<OpenChangeFn>,
}

impl UncontrolledOpen {
    pub const fn new(default_open: bool) -> Self {
        Self {
            open: default_open,
            on_change: None,
        }
    }

    /// Also notify an observer of every change.
    #[must_use]
    pub fn on_change(mut self, on_change: impl FnMut(bool) + Send + 'static) -> Self {
        self.set_on_change(on_change);
        self
    }

    pub fn set_on_change(&mut self, on_change: impl FnMut(bool) + Send + 'static) {
        self.on_change = Some(Box::new(on_change));
    }

    /// Replace the starting value. Not a transition, so nobody is notified.
    pub const fn set_default(&mut self, open: bool) {
        self.open = open;
    }
}

impl OpenState for UncontrolledOpen {
    fn get(&self) -> bool {
        self.open
    }

    fn set(&mut self, next: bool) {
        if self.open == next {
            return;
        }
        self.open = next;
        if let Some(on_change) = &mut self.on_change {
            on_change(next);
        }
    }
}

/// Visibility mirrored from an owner.
///
/// The owner publishes its value through the `watch` sender it keeps; the
/// drawer only forwards requests to `on_change` and never writes the value
/// itself.
pub struct ControlledOpen {
    value: watch::Receiver<bool>,
    on_change: OpenChangeFn,
}

impl ControlledOpen {
    pub fn new(value: watch::Receiver<bool>, on_change: impl FnMut(bool) + Send + 'static) -> Self {
        Self {
            value,
            on_change: Box::new(on_change),
        }
    }
}

impl OpenState for ControlledOpen {
    fn get(&self) -> bool {
        *self.value.borrow()
    }

    fn set(&mut self, next: bool) {
        if self.get() != next {
            (self.on_change)(next);
        }
    }

    fn is_controlled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<bool>>>, impl FnMut(bool) + Send + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |open| sink.lock().unwrap().push(open))
    }

    #[test]
    fn test_uncontrolled_defaults_closed() {
        assert!(!UncontrolledOpen::new(false).get());
        assert!(UncontrolledOpen::new(true).get());
    }

    #[test]
    fn test_uncontrolled_notifies_only_on_transitions() {
        let (calls, on_change) = recorder();
        let mut state = UncontrolledOpen::new(false).on_change(on_change);

        state.set(true);
        state.set(true);
        state.set(false);
        state.set(false);

        assert!(!state.get());
        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_controlled_forwards_without_mutating() {
        let (owner, value) = watch::channel(false);
        let (calls, on_change) = recorder();
        let mut state = ControlledOpen::new(value, on_change);

        state.set(true);
        assert!(!state.get(), "owner has not mirrored the request yet");
        assert_eq!(*calls.lock().unwrap(), vec![true]);

        owner.send_replace(true);
        assert!(state.get());

        // Already open: nothing to forward
        state.set(true);
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert!(state.is_controlled());
    }
}
