//! Close/reset policy.

use tracing::debug;

use crate::form::HostedForm;

/// Decides whether closing is allowed and what happens to the hosted form's
/// fields once the drawer has closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosePolicy {
    preserve_fields_on_close: bool,
}

impl ClosePolicy {
    pub const fn new(preserve_fields_on_close: bool) -> Self {
        Self {
            preserve_fields_on_close,
        }
    }

    /// Derive the policy from the form's `preserve` option and the chrome's
    /// `destroy_on_close` setting. Destroying the panel always clears fields.
    pub fn from_options(preserve: Option<bool>, destroy_on_close: bool) -> Self {
        Self::new(!destroy_on_close && preserve.unwrap_or(false))
    }

    /// Closing is refused while a submission is pending.
    pub const fn may_close(&self, pending: bool) -> bool {
        !pending
    }

    /// Apply the reset half of the policy after an open→closed transition.
    pub fn after_close<F: HostedForm>(&self, form: &mut F) {
        if self.preserve_fields_on_close {
            debug!("Preserving form fields across close");
        } else {
            form.reset();
        }
    }
}
