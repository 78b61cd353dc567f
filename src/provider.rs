//! Provider configuration forms.
//!
//! Each provider module declares the field schema of its configuration form,
//! the typed config parsed from submitted values and the handler that applies
//! a submission.

pub mod tencentcloud_cdn;
