//! Submission coordinator.
//!
//! Runs validate → submit → interpret for the hosted form and owns the
//! `pending` flag. At most one submission is in flight per session; further
//! requests while pending are dropped, not queued.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::command::Command;
use crate::form::HostedForm;

/// What a submit handler resolves to.
///
/// `Ok(None)` and `Ok(Some(true))` accept, `Ok(Some(false))` rejects and
/// `Err(_)` fails.
pub type FinishResult = color_eyre::Result<Option<bool>>;

/// Result of an attempted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The handler succeeded; the drawer closes.
    Accepted,
    /// Validation failed or the handler declined; the drawer stays open.
    Rejected,
    /// The handler raised an error; the drawer stays open.
    Failed,
}

impl SubmissionOutcome {
    /// Interpret a handler's result. An absent value counts as success,
    /// only an explicit `false` rejects. Errors are logged and swallowed.
    pub fn from_finish(result: FinishResult) -> Self {
        match result {
            Ok(None | Some(true)) => Self::Accepted,
            Ok(Some(false)) => Self::Rejected,
            Err(error) => {
                warn!(error = %error, "Submit handler failed, keeping drawer open");
                Self::Failed
            }
        }
    }
}

/// The external submit operation, opaque to the drawer.
///
/// Handlers are expected to surface their own failures (e.g. a toast)
/// before returning an error.
#[async_trait]
pub trait SubmitHandler<V: Send + 'static>: Send + Sync {
    async fn on_finish(&self, values: V) -> FinishResult;
}

#[async_trait]
impl<V, F, Fut> SubmitHandler<V> for F
where
    V: Send + 'static,
    F: Fn(V) -> Fut + Send + Sync,
    Fut: Future<Output = FinishResult> + Send + 'static,
{
    async fn on_finish(&self, values: V) -> FinishResult {
        self(values).await
    }
}

/// Await a handler and interpret its result.
pub async fn run<V: Send + 'static>(handler: &dyn SubmitHandler<V>, values: V) -> SubmissionOutcome {
    SubmissionOutcome::from_finish(handler.on_finish(values).await)
}

/// Outcome of an in-flight submission, tagged with the session it belongs to.
#[derive(Debug, Clone, Copy)]
struct SubmissionReport {
    session: u64,
    outcome: SubmissionOutcome,
}

/// What [`SubmissionCoordinator::submit`] did.
pub enum SubmitStep<V: Send + 'static> {
    /// A submission is already pending; nothing happened.
    Ignored,
    /// Finished synchronously (validation failed).
    Finished(SubmissionOutcome),
    /// Validation passed; spawn this command to run the handler.
    InFlight(SubmitCmd<V>),
}

/// Owns the pending flag and the channel in-flight submissions report on.
pub struct SubmissionCoordinator<V: Send + 'static> {
    handler: Arc<dyn SubmitHandler<V>>,
    pending: bool,
    session: u64,
    report_tx: UnboundedSender<SubmissionReport>,
    report_rx: UnboundedReceiver<SubmissionReport>,
}

impl<V: Send + 'static> SubmissionCoordinator<V> {
    pub fn new(handler: Arc<dyn SubmitHandler<V>>) -> Self {
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        Self {
            handler,
            pending: false,
            session: 0,
            report_tx,
            report_rx,
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start a submission of `form`'s values.
    pub fn submit<F>(&mut self, form: &mut F) -> SubmitStep<V>
    where
        F: HostedForm<Values = V>,
    {
        if self.pending {
            debug!("Submission already in flight, ignoring submit");
            return SubmitStep::Ignored;
        }
        self.pending = true;

        match form.validate_and_collect() {
            Err(errors) => {
                debug!(errors = errors.len(), "Form validation failed");
                self.pending = false;
                SubmitStep::Finished(SubmissionOutcome::Rejected)
            }
            Ok(values) => SubmitStep::InFlight(SubmitCmd {
                handler: Arc::clone(&self.handler),
                values,
                session: self.session,
                report_tx: self.report_tx.clone(),
            }),
        }
    }

    /// Collect the outcome of the current session's submission, if it has
    /// finished. Clears `pending` when it returns an outcome.
    pub fn poll(&mut self) -> Option<SubmissionOutcome> {
        while let Ok(report) = self.report_rx.try_recv() {
            if report.session != self.session {
                warn!(
                    outcome = ?report.outcome,
                    "Discarding submission outcome from a closed drawer session"
                );
                continue;
            }
            self.pending = false;
            return Some(report.outcome);
        }
        None
    }

    /// End the session: clear `pending` and orphan any in-flight submission.
    pub fn end_session(&mut self) {
        if self.pending {
            warn!("Drawer closed while a submission was in flight");
        }
        self.pending = false;
        self.session += 1;
    }
}

/// Runs the submit handler off the event loop and reports back.
pub struct SubmitCmd<V: Send + 'static> {
    handler: Arc<dyn SubmitHandler<V>>,
    values: V,
    session: u64,
    report_tx: UnboundedSender<SubmissionReport>,
}

#[async_trait]
impl<V: Send + 'static> Command for SubmitCmd<V> {
    fn name(&self) -> String {
        "Submitting form".to_string()
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        let Self {
            handler,
            values,
            session,
            report_tx,
        } = *self;
        let outcome = AssertUnwindSafe(run(handler.as_ref(), values))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                warn!("Submit handler panicked, keeping drawer open");
                SubmissionOutcome::Failed
            });
        // The drawer may be gone; nobody to tell then
        let _ = report_tx.send(SubmissionReport { session, outcome });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use color_eyre::eyre::eyre;

    use super::*;
    use crate::form::validators::required;
    use crate::form::{FieldForm, FieldSpec, FieldValues};

    fn counting_handler(
        result: fn() -> FinishResult,
    ) -> (Arc<AtomicUsize>, Arc<dyn SubmitHandler<FieldValues>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler = move |_values: FieldValues| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { result() }
        };
        (calls, Arc::new(handler))
    }

    fn filled_form() -> FieldForm {
        let mut form = FieldForm::new(vec![
            FieldSpec::new("domain", "Domain").rule(required("required")),
        ]);
        form.set_value("domain", "example.com");
        form
    }

    async fn execute(step: SubmitStep<FieldValues>) {
        match step {
            SubmitStep::InFlight(cmd) => Box::new(cmd).execute().await.unwrap(),
            _ => panic!("expected an in-flight submission"),
        }
    }

    #[test]
    fn test_outcome_mapping() {
        assert_eq!(SubmissionOutcome::from_finish(Ok(None)), SubmissionOutcome::Accepted);
        assert_eq!(SubmissionOutcome::from_finish(Ok(Some(true))), SubmissionOutcome::Accepted);
        assert_eq!(SubmissionOutcome::from_finish(Ok(Some(false))), SubmissionOutcome::Rejected);
        assert_eq!(
            SubmissionOutcome::from_finish(Err(eyre!("boom"))),
            SubmissionOutcome::Failed
        );
    }

    #[tokio::test]
    async fn test_run_awaits_handler() {
        let (calls, handler) = counting_handler(|| Ok(Some(false)));
        let outcome = run(handler.as_ref(), FieldValues::new()).await;
        assert_eq!(outcome, SubmissionOutcome::Rejected);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_only_first_of_rapid_submits_is_dispatched() {
        let (calls, handler) = counting_handler(|| Ok(None));
        let mut coordinator = SubmissionCoordinator::new(handler);
        let mut form = filled_form();

        let first = coordinator.submit(&mut form);
        assert!(coordinator.is_pending());
        assert!(matches!(coordinator.submit(&mut form), SubmitStep::Ignored));
        assert!(matches!(coordinator.submit(&mut form), SubmitStep::Ignored));

        execute(first).await;
        assert_eq!(coordinator.poll(), Some(SubmissionOutcome::Accepted));
        assert!(!coordinator.is_pending());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(matches!(coordinator.submit(&mut form), SubmitStep::InFlight(_)));
    }

    #[tokio::test]
    async fn test_validation_failure_skips_handler() {
        let (calls, handler) = counting_handler(|| Ok(None));
        let mut coordinator = SubmissionCoordinator::new(handler);
        let mut form = FieldForm::new(vec![
            FieldSpec::new("domain", "Domain").rule(required("required")),
        ]);

        let step = coordinator.submit(&mut form);
        assert!(matches!(step, SubmitStep::Finished(SubmissionOutcome::Rejected)));
        assert!(!coordinator.is_pending());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_is_swallowed() {
        let (_, handler) = counting_handler(|| Err(eyre!("quota exceeded")));
        let mut coordinator = SubmissionCoordinator::new(handler);
        let mut form = filled_form();

        execute(coordinator.submit(&mut form)).await;
        assert_eq!(coordinator.poll(), Some(SubmissionOutcome::Failed));
        assert!(!coordinator.is_pending());
    }

    #[tokio::test]
    async fn test_panicking_handler_clears_pending() {
        fn crash() -> FinishResult {
            panic!("handler crashed")
        }
        let (_, handler) = counting_handler(crash);
        let mut coordinator = SubmissionCoordinator::new(handler);
        let mut form = filled_form();

        execute(coordinator.submit(&mut form)).await;
        assert_eq!(coordinator.poll(), Some(SubmissionOutcome::Failed));
        assert!(!coordinator.is_pending());
    }

    #[tokio::test]
    async fn test_outcome_from_ended_session_is_discarded() {
        let (_, handler) = counting_handler(|| Ok(None));
        let mut coordinator = SubmissionCoordinator::new(handler);
        let mut form = filled_form();

        let step = coordinator.submit(&mut form);
        coordinator.end_session();
        assert!(!coordinator.is_pending());

        execute(step).await;
        assert_eq!(coordinator.poll(), None);
    }
}
