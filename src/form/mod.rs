//! Hosted form interface.
//!
//! The drawer never looks at field contents. It only asks the hosted form to
//! validate and collect its values before a submission, and to reset its
//! fields when the panel closes.

mod field_form;
pub mod validators;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use field_form::{FieldForm, FieldSpec};
pub use validators::Validator;

use crate::ui::Component;

/// Event emitted by a hosted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user asked to submit from inside the form (Enter on the last field).
    Submit,
    /// The user asked to leave the form (Esc).
    Dismiss,
}

/// A field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Externally-owned form rendered inside the drawer.
///
/// Validation failures are surfaced inline by the form itself; the drawer
/// only reads back whether validation passed.
pub trait HostedForm: Component<Output = FormEvent> {
    /// Values handed to the submit handler.
    type Values: Send + 'static;

    /// Run every validator and, if all pass, collect the current values.
    ///
    /// # Errors
    /// Returns the field-level errors when any validator fails.
    fn validate_and_collect(&mut self) -> Result<Self::Values, Vec<FieldError>>;

    /// Reset every field to its initial value and clear validation state.
    fn reset(&mut self);
}

/// Collected field values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Deserialize into a typed model, e.g. a provider's config struct.
    ///
    /// # Errors
    /// Fails when the values don't match the target's shape.
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
