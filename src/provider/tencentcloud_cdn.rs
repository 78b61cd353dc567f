//! Tencent Cloud CDN node configuration.

use std::time::Duration;

use async_trait::async_trait;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::drawer::{FinishResult, SubmitHandler};
use crate::form::validators::{domain_name, required};
use crate::form::{FieldForm, FieldSpec, FieldValues};
use crate::ui::Toast;

pub const TITLE: &str = "Tencent Cloud CDN";

const DOMAIN_FIELD: &str = "domain";

/// Configuration stored on the deploy node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TencentCdnConfig {
    pub domain: String,
}

impl TencentCdnConfig {
    /// Field values that prefill the form with this config.
    pub fn to_values(&self) -> FieldValues {
        FieldValues::new().with(DOMAIN_FIELD, self.domain.clone())
    }
}

/// Side effects of a submission, delivered to the screen that owns the node.
#[derive(Debug, Clone)]
pub enum CdnEvent {
    Toast(Toast),
    Saved(TencentCdnConfig),
}

/// Field schema of the CDN form.
pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(DOMAIN_FIELD, "Acceleration domain")
            .placeholder("cdn.example.com")
            .tooltip("Wildcard domains such as *.example.com are supported")
            .rule(required("Please enter the acceleration domain"))
            .rule(domain_name(true, "Please enter a valid domain name")),
    ]
}

/// Build the form, prefilled with the node's current config.
pub fn form(current: Option<&TencentCdnConfig>) -> FieldForm {
    let form = FieldForm::new(fields());
    match current {
        Some(config) => form.with_initial_values(config.to_values()),
        None => form,
    }
}

/// Applies a submitted CDN config to the deploy node.
///
/// Stands in for the remote call: it waits `latency`, then
/// - fails for domains under `.invalid`,
/// - declines domains under `.example`,
/// - saves everything else.
pub struct DeployHandler {
    latency: Duration,
    events: UnboundedSender<CdnEvent>,
}

impl DeployHandler {
    pub const fn new(latency: Duration, events: UnboundedSender<CdnEvent>) -> Self {
        Self { latency, events }
    }

    fn notify(&self, event: CdnEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl SubmitHandler<FieldValues> for DeployHandler {
    async fn on_finish(&self, values: FieldValues) -> FinishResult {
        let config: TencentCdnConfig = values.parse()?;
        debug!(domain = %config.domain, "Applying CDN config");
        tokio::time::sleep(self.latency).await;

        if config.domain.ends_with(".invalid") {
            self.notify(CdnEvent::Toast(Toast::error(format!(
                "Failed to reach {}",
                config.domain
            ))));
            return Err(eyre!("domain {} could not be resolved", config.domain));
        }

        if config.domain.ends_with(".example") {
            self.notify(CdnEvent::Toast(Toast::info(format!(
                "{} is reserved, pick another domain",
                config.domain
            ))));
            return Ok(Some(false));
        }

        info!(domain = %config.domain, "CDN config saved");
        self.notify(CdnEvent::Toast(Toast::success(format!(
            "Saved {}",
            config.domain
        ))));
        self.notify(CdnEvent::Saved(config));
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::drawer::SubmissionOutcome;
    use crate::drawer::submit::run;
    use crate::form::HostedForm;

    fn handler() -> (DeployHandler, mpsc::UnboundedReceiver<CdnEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (DeployHandler::new(Duration::ZERO, tx), rx)
    }

    fn values(domain: &str) -> FieldValues {
        FieldValues::new().with(DOMAIN_FIELD, domain)
    }

    #[tokio::test]
    async fn test_saves_valid_domain() {
        let (handler, mut rx) = handler();
        let outcome = run(&handler, values("cdn.acme.com")).await;
        assert_eq!(outcome, SubmissionOutcome::Accepted);

        assert!(matches!(rx.recv().await, Some(CdnEvent::Toast(_))));
        match rx.recv().await {
            Some(CdnEvent::Saved(config)) => assert_eq!(config.domain, "cdn.acme.com"),
            other => panic!("expected saved config, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_example_domain_is_declined() {
        let (handler, mut rx) = handler();
        let outcome = run(&handler, values("cdn.example")).await;
        assert_eq!(outcome, SubmissionOutcome::Rejected);
        assert!(matches!(rx.try_recv(), Ok(CdnEvent::Toast(_))));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_invalid_domain_fails_after_toast() {
        let (handler, mut rx) = handler();
        let outcome = run(&handler, values("cdn.invalid")).await;
        assert_eq!(outcome, SubmissionOutcome::Failed);
        match rx.try_recv() {
            Ok(CdnEvent::Toast(toast)) => assert!(toast.message().contains("cdn.invalid")),
            other => panic!("expected error toast, got {other:?}"),
        }
    }

    #[test]
    fn test_form_validates_domain() {
        let mut form = form(None);
        assert!(form.validate_and_collect().is_err());

        form.set_value(DOMAIN_FIELD, "not a domain");
        assert!(form.validate_and_collect().is_err());

        form.set_value(DOMAIN_FIELD, "*.acme.com");
        let values = form.validate_and_collect().unwrap();
        assert_eq!(values.get(DOMAIN_FIELD), Some("*.acme.com"));
    }

    #[test]
    fn test_form_prefills_current_config() {
        let current = TencentCdnConfig {
            domain: "cdn.acme.com".to_string(),
        };
        let mut form = form(Some(&current));
        assert_eq!(form.value(DOMAIN_FIELD), Some("cdn.acme.com"));

        form.set_value(DOMAIN_FIELD, "other.acme.com");
        form.reset();
        assert_eq!(form.value(DOMAIN_FIELD), Some("cdn.acme.com"));
    }
}
