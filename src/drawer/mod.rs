//! Drawer form controller.
//!
//! [`DrawerForm`] hosts a form in a panel that slides out from the right
//! edge. It wires together:
//! - [`open_state`] - controlled or uncontrolled visibility
//! - [`trigger`] - the optional activation element that opens the panel
//! - [`submit`] - validate → submit → interpret, with the `pending` flag
//! - [`policy`] - close gating and field reset on close
//! - [`footer`] - the Cancel/Ok actions
//!
//! Like services, the drawer queues messages from input and processes them
//! in `update()`, the single place that can return commands.

pub mod footer;
pub mod open_state;
pub mod policy;
pub mod submit;
pub mod trigger;

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

pub use footer::{ButtonProps, Footer, FooterAction};
pub use open_state::{ControlledOpen, OpenChangeFn, OpenState, UncontrolledOpen};
pub use policy::ClosePolicy;
pub use submit::{FinishResult, SubmissionCoordinator, SubmissionOutcome, SubmitHandler, SubmitStep};
pub use trigger::{BoundTrigger, Trigger, bind_trigger};

use crate::Theme;
use crate::command::UpdateResult;
use crate::config::{DrawerAction, DrawerConfig, KeyResolver};
use crate::form::{FormEvent, HostedForm};
use crate::ui::Handled;

/// Horizontal size of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerWidth {
    /// Percentage of the available width.
    Percent(u16),
    /// Fixed number of columns.
    Columns(u16),
}

impl Default for DrawerWidth {
    fn default() -> Self {
        Self::Percent(40)
    }
}

/// Messages the drawer queues for `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerMsg {
    /// The trigger was activated.
    Trigger,
    /// The Ok action.
    Ok,
    /// The Cancel action.
    Cancel,
    /// The panel's own dismissal (Esc).
    Dismiss,
}

/// Where the drawer's visibility lives.
enum Visibility {
    /// Built by the drawer; `default_open` and `on_open_change` configure it.
    Own(UncontrolledOpen),
    /// Supplied through `with_open_state` and left as given.
    Injected(Box<dyn OpenState>),
}

impl Visibility {
    fn state(&self) -> &dyn OpenState {
        match self {
            Self::Own(state) => state,
            Self::Injected(state) => state.as_ref(),
        }
    }

    fn state_mut(&mut self) -> &mut dyn OpenState {
        match self {
            Self::Own(state) => state,
            Self::Injected(state) => state.as_mut(),
        }
    }
}

/// A slide-out panel hosting a form, with an async submission flow.
pub struct DrawerForm<F: HostedForm> {
    form: F,
    open: Visibility,
    /// Last visibility seen by `observe()`, used to detect transitions.
    observed_open: bool,
    coordinator: SubmissionCoordinator<F::Values>,
    policy: ClosePolicy,
    footer: Footer,
    trigger: Option<BoundTrigger>,
    after_open_change: Option<OpenChangeFn>,
    resolver: Arc<KeyResolver>,
    title: String,
    width: DrawerWidth,
    msg_tx: UnboundedSender<DrawerMsg>,
    msg_rx: UnboundedReceiver<DrawerMsg>,
}

impl<F: HostedForm> DrawerForm<F> {
    /// Create an uncontrolled, initially closed drawer around `form`.
    pub fn new(
        form: F,
        handler: impl SubmitHandler<F::Values> + 'static,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let footer = Footer::new(
            resolver.display_drawer(DrawerAction::Cancel),
            resolver.display_drawer(DrawerAction::Ok),
        );
        Self {
            form,
            open: Visibility::Own(UncontrolledOpen::new(false)),
            observed_open: false,
            coordinator: SubmissionCoordinator::new(Arc::new(handler)),
            policy: ClosePolicy::default(),
            footer,
            trigger: None,
            after_open_change: None,
            resolver,
            title: String::new(),
            width: DrawerWidth::default(),
            msg_tx,
            msg_rx,
        }
    }

    /// Apply the configured defaults (width, texts, reset policy, default open).
    #[must_use]
    pub fn with_config(self, config: &DrawerConfig) -> Self {
        self.with_width(DrawerWidth::Percent(config.width_percent))
            .with_ok_text(config.ok_text.clone())
            .with_cancel_text(config.cancel_text.clone())
            .with_close_policy(ClosePolicy::from_options(
                Some(config.preserve_fields),
                config.destroy_on_close,
            ))
            .default_open(config.default_open)
    }

    /// Start the drawer's own visibility at `open`.
    ///
    /// Ignored once an open state has been injected, whatever the builder
    /// order.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        match &mut self.open {
            Visibility::Own(state) => {
                state.set_default(open);
                self.observed_open = open;
            }
            Visibility::Injected(_) => debug!("Open state injected, ignoring default_open"),
        }
        self
    }

    /// Notify `callback` of every visibility change the drawer makes to its
    /// own state. An injected state carries its own notification.
    #[must_use]
    pub fn on_open_change(mut self, callback: impl FnMut(bool) + Send + 'static) -> Self {
        match &mut self.open {
            Visibility::Own(state) => state.set_on_change(callback),
            Visibility::Injected(_) => debug!("Open state injected, ignoring on_open_change"),
        }
        self
    }

    /// Inject the visibility implementation (e.g. [`ControlledOpen`]).
    #[must_use]
    pub fn with_open_state(mut self, open: impl OpenState + 'static) -> Self {
        self.observed_open = open.get();
        self.open = Visibility::Injected(Box::new(open));
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = bind_trigger(Some(trigger));
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub const fn with_width(mut self, width: DrawerWidth) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_ok_text(mut self, text: impl Into<String>) -> Self {
        self.footer.set_ok_text(text);
        self
    }

    #[must_use]
    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.footer.set_cancel_text(text);
        self
    }

    #[must_use]
    pub const fn with_ok_button_props(mut self, props: ButtonProps) -> Self {
        self.footer.set_ok_props(props);
        self
    }

    #[must_use]
    pub const fn with_cancel_button_props(mut self, props: ButtonProps) -> Self {
        self.footer.set_cancel_props(props);
        self
    }

    #[must_use]
    pub const fn with_close_policy(mut self, policy: ClosePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Called once per observed visibility transition, after the reset policy.
    #[must_use]
    pub fn after_open_change(mut self, callback: impl FnMut(bool) + Send + 'static) -> Self {
        self.after_open_change = Some(Box::new(callback));
        self
    }

    pub fn is_open(&self) -> bool {
        self.open.state().get()
    }

    pub const fn is_pending(&self) -> bool {
        self.coordinator.is_pending()
    }

    pub const fn form(&self) -> &F {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Queue a message to be processed by `update()`.
    pub fn queue(&self, msg: DrawerMsg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Ask for a visibility change through the open state.
    pub fn request_open_change(&mut self, next: bool) {
        self.open.state_mut().set(next);
        self.observe();
    }

    /// Close unless a submission is pending.
    pub fn request_close(&mut self) {
        if !self.policy.may_close(self.is_pending()) {
            debug!("Submission pending, ignoring close request");
            return;
        }
        self.request_open_change(false);
    }

    /// The Ok action: start a submission.
    ///
    /// Returns the command to spawn when the handler has to run.
    pub fn submit(&mut self) -> UpdateResult {
        if !self.is_open() {
            debug!("Drawer closed, ignoring submit");
            return UpdateResult::Idle;
        }
        if !self.footer.is_enabled(FooterAction::Ok, self.is_pending()) {
            return UpdateResult::Idle;
        }
        match self.coordinator.submit(&mut self.form) {
            SubmitStep::Ignored => UpdateResult::Idle,
            SubmitStep::Finished(outcome) => {
                self.finish(outcome);
                UpdateResult::Idle
            }
            SubmitStep::InFlight(cmd) => cmd.into(),
        }
    }

    /// The Cancel action.
    pub fn cancel(&mut self) {
        if self.footer.is_enabled(FooterAction::Cancel, self.is_pending()) {
            self.request_close();
        }
    }

    /// Handle a key event.
    ///
    /// While closed only the trigger is considered. While open the panel
    /// captures every key. Returns `true` if the event was consumed (the
    /// caller should then call `update()`).
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.is_open() {
            return match &mut self.trigger {
                Some(trigger) if trigger.matches(&key) => {
                    trigger.activate();
                    self.queue(DrawerMsg::Trigger);
                    true
                }
                _ => false,
            };
        }

        let msg = if self.resolver.matches_drawer(&key, DrawerAction::Ok) {
            Some(DrawerMsg::Ok)
        } else if self.resolver.matches_drawer(&key, DrawerAction::Cancel) {
            Some(DrawerMsg::Cancel)
        } else if self.resolver.matches_drawer(&key, DrawerAction::Dismiss) {
            Some(DrawerMsg::Dismiss)
        } else {
            match self.form.handle_key(key) {
                Ok(Handled::Event(FormEvent::Submit)) => Some(DrawerMsg::Ok),
                Ok(Handled::Event(FormEvent::Dismiss)) => Some(DrawerMsg::Dismiss),
                Ok(_) => None,
                Err(error) => {
                    debug!(error = %error, "Hosted form failed to handle key");
                    None
                }
            }
        };

        if let Some(msg) = msg {
            self.queue(msg);
        }
        true
    }

    pub fn handle_tick(&mut self) {
        self.footer.handle_tick();
    }

    /// Process queued messages and finished submissions.
    ///
    /// **This is the single funnel**: call it after consumed input, after a
    /// command completes, and after a controlling owner changes the value.
    pub fn update(&mut self) -> UpdateResult {
        self.observe();

        if let Some(outcome) = self.coordinator.poll() {
            self.finish(outcome);
        }

        let mut result = UpdateResult::Idle;
        while let Ok(msg) = self.msg_rx.try_recv() {
            result = result.merge(self.process_message(msg));
        }

        self.observe();
        result
    }

    fn process_message(&mut self, msg: DrawerMsg) -> UpdateResult {
        match msg {
            DrawerMsg::Trigger => {
                self.request_open_change(true);
                UpdateResult::Idle
            }
            DrawerMsg::Ok => self.submit(),
            DrawerMsg::Cancel => {
                self.cancel();
                UpdateResult::Idle
            }
            DrawerMsg::Dismiss => {
                self.request_close();
                UpdateResult::Idle
            }
        }
    }

    fn finish(&mut self, outcome: SubmissionOutcome) {
        debug!(?outcome, "Submission finished");
        if outcome == SubmissionOutcome::Accepted {
            self.request_open_change(false);
        }
    }

    /// Detect an open/closed transition and run its side effects once.
    fn observe(&mut self) {
        let open = self.open.state().get();
        if open == self.observed_open {
            return;
        }
        self.observed_open = open;
        info!(open, controlled = self.open.state().is_controlled(), "Drawer visibility changed");

        if !open {
            self.coordinator.end_session();
            self.policy.after_close(&mut self.form);
        }

        if let Some(callback) = &mut self.after_open_change {
            callback(open);
        }
    }

    /// Draw the trigger hint, if a trigger is bound.
    pub fn render_trigger(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(trigger) = &self.trigger {
            trigger.render(frame, area, theme);
        }
    }

    fn panel_area(&self, area: Rect) -> Rect {
        let width = match self.width {
            DrawerWidth::Percent(percent) => Constraint::Percentage(percent.min(100)),
            DrawerWidth::Columns(columns) => Constraint::Length(columns.min(area.width)),
        };
        let [_, panel] = Layout::horizontal([Constraint::Fill(1), width]).areas(area);
        panel
    }

    /// Draw the panel over `area` when open.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.is_open() {
            return;
        }

        let panel = self.panel_area(area);
        frame.render_widget(Clear, panel);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));

        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [body, separator, footer] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .margin(1)
        .areas(inner);

        self.form.render(frame, body, theme);
        frame.render_widget(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.surface1())),
            separator,
        );
        let pending = self.is_pending();
        self.footer.render(frame, footer, theme, pending);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use color_eyre::eyre::eyre;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::watch;

    use super::*;
    use crate::config::{Key, KeybindingsConfig};
    use crate::form::validators::required;
    use crate::form::{FieldForm, FieldSpec, FieldValues};

    fn resolver() -> Arc<KeyResolver> {
        Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())))
    }

    fn form() -> FieldForm {
        FieldForm::new(vec![
            FieldSpec::new("domain", "Domain").rule(required("Please enter a domain")),
        ])
    }

    fn drawer(result: fn() -> FinishResult) -> DrawerForm<FieldForm> {
        let handler = move |_values: FieldValues| async move { result() };
        DrawerForm::new(form(), handler, resolver())
            .with_title("CDN")
            .with_trigger(Trigger::new("Configure", Key::new(KeyCode::Char('n')).into()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn run(result: UpdateResult) {
        for command in result.into_commands() {
            command.execute().await.unwrap();
        }
    }

    fn open_and_fill(drawer: &mut DrawerForm<FieldForm>) {
        assert!(drawer.handle_key(key(KeyCode::Char('n'))));
        assert!(drawer.update().is_empty());
        assert!(drawer.is_open());
        drawer.form_mut().set_value("domain", "cdn.example.com");
    }

    #[tokio::test]
    async fn test_accept_closes_and_resets() {
        let mut drawer = drawer(|| Ok(None));
        open_and_fill(&mut drawer);

        drawer.handle_key(ctrl('s'));
        let commands = drawer.update();
        assert_eq!(commands.len(), 1);
        assert!(drawer.is_pending());
        assert!(drawer.is_open());

        run(commands).await;
        drawer.update();
        assert!(!drawer.is_open());
        assert!(!drawer.is_pending());
        assert_eq!(drawer.form().value("domain"), Some(""));
    }

    #[tokio::test]
    async fn test_explicit_true_accepts() {
        let mut drawer = drawer(|| Ok(Some(true)));
        open_and_fill(&mut drawer);
        run(drawer.submit()).await;
        drawer.update();
        assert!(!drawer.is_open());
    }

    #[tokio::test]
    async fn test_explicit_reject_keeps_open_without_reset() {
        let mut drawer = drawer(|| Ok(Some(false)));
        open_and_fill(&mut drawer);

        run(drawer.submit()).await;
        drawer.update();
        assert!(drawer.is_open());
        assert!(!drawer.is_pending());
        assert_eq!(drawer.form().value("domain"), Some("cdn.example.com"));
    }

    #[tokio::test]
    async fn test_error_keeps_open() {
        let mut drawer = drawer(|| Err(eyre!("upload failed")));
        open_and_fill(&mut drawer);

        run(drawer.submit()).await;
        let result = drawer.update();
        assert!(result.is_empty());
        assert!(drawer.is_open());
        assert!(!drawer.is_pending());
    }

    #[tokio::test]
    async fn test_rapid_ok_dispatches_once() {
        let mut drawer = drawer(|| Ok(None));
        open_and_fill(&mut drawer);

        drawer.handle_key(ctrl('s'));
        drawer.handle_key(ctrl('s'));
        drawer.handle_key(key(KeyCode::Enter));
        let commands = drawer.update();
        assert_eq!(commands.len(), 1);
        assert!(drawer.submit().is_empty());
    }

    #[tokio::test]
    async fn test_close_guarded_while_pending() {
        let mut drawer = drawer(|| Ok(Some(false)));
        open_and_fill(&mut drawer);

        let commands = drawer.submit();
        drawer.request_close();
        drawer.cancel();
        drawer.handle_key(key(KeyCode::Esc));
        drawer.handle_key(ctrl('x'));
        assert!(drawer.update().is_empty());
        assert!(drawer.is_open());
        assert!(drawer.is_pending());

        run(commands).await;
        drawer.update();
        assert!(!drawer.is_pending());

        drawer.handle_key(key(KeyCode::Esc));
        drawer.update();
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_validation_failure_stays_open() {
        let mut drawer = drawer(|| Ok(None));
        drawer.request_open_change(true);

        assert!(drawer.submit().is_empty());
        assert!(drawer.is_open());
        assert!(!drawer.is_pending());
        assert_eq!(drawer.form().error("domain"), Some("Please enter a domain"));
    }

    #[test]
    fn test_preserve_fields_across_reopen() {
        let mut drawer = drawer(|| Ok(None)).with_close_policy(ClosePolicy::new(true));
        open_and_fill(&mut drawer);

        drawer.cancel();
        assert!(!drawer.is_open());
        drawer.request_open_change(true);
        assert_eq!(drawer.form().value("domain"), Some("cdn.example.com"));
    }

    #[test]
    fn test_reset_on_close_by_default() {
        let mut drawer = drawer(|| Ok(None));
        open_and_fill(&mut drawer);

        drawer.handle_key(key(KeyCode::Esc));
        drawer.update();
        drawer.request_open_change(true);
        assert_eq!(drawer.form().value("domain"), Some(""));
    }

    #[test]
    fn test_repeated_close_runs_side_effects_once() {
        let transitions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&transitions);
        let mut drawer = drawer(|| Ok(None))
            .default_open(true)
            .after_open_change(move |open| sink.lock().unwrap().push(open));

        drawer.request_open_change(false);
        drawer.request_open_change(false);
        drawer.request_close();
        drawer.update();
        drawer.request_open_change(true);
        drawer.request_open_change(true);

        assert_eq!(*transitions.lock().unwrap(), vec![false, true]);
    }

    #[test]
    fn test_trigger_is_ignored_while_open() {
        let mut drawer = drawer(|| Ok(None)).default_open(true);
        assert!(drawer.handle_key(key(KeyCode::Char('n'))));
        drawer.update();
        // Typed into the field instead of re-triggering
        assert_eq!(drawer.form().value("domain"), Some("n"));
    }

    #[test]
    fn test_disabled_ok_never_submits() {
        let mut drawer = drawer(|| Ok(None)).with_ok_button_props(ButtonProps::disabled());
        open_and_fill(&mut drawer);
        assert!(drawer.submit().is_empty());
        assert!(!drawer.is_pending());
    }

    #[derive(Clone, Copy, Debug)]
    enum Action {
        Trigger,
        Cancel,
        Dismiss,
        Fill,
        Ok,
    }

    async fn play(drawer: &mut DrawerForm<FieldForm>, actions: &[Action]) -> Vec<bool> {
        let mut seen = Vec::new();
        for action in actions {
            match action {
                Action::Trigger => {
                    drawer.handle_key(key(KeyCode::Char('n')));
                }
                Action::Cancel => {
                    drawer.handle_key(ctrl('x'));
                }
                Action::Dismiss => {
                    drawer.handle_key(key(KeyCode::Esc));
                }
                Action::Fill => drawer.form_mut().set_value("domain", "example.com"),
                Action::Ok => {
                    drawer.handle_key(ctrl('s'));
                }
            }
            run(drawer.update()).await;
            drawer.update();
            seen.push(drawer.is_open());
        }
        seen
    }

    #[tokio::test]
    async fn test_controlled_and_uncontrolled_are_equivalent() {
        use Action::{Cancel, Dismiss, Fill, Ok, Trigger};
        let actions = [
            Trigger, Trigger, Cancel, Trigger, Ok, Fill, Ok, Trigger, Dismiss, Dismiss,
        ];

        let mut uncontrolled = drawer(|| Result::Ok(None));

        let (owner, value) = watch::channel(false);
        let mirror = ControlledOpen::new(value, move |open| {
            owner.send_replace(open);
        });
        let mut controlled = drawer(|| Result::Ok(None)).with_open_state(mirror);

        let expected = play(&mut uncontrolled, &actions).await;
        assert_eq!(
            expected,
            vec![true, true, false, true, true, true, false, true, false, false]
        );
        assert_eq!(play(&mut controlled, &actions).await, expected);
    }

    #[tokio::test]
    async fn test_owner_forcing_close_discards_in_flight_outcome() {
        let (owner, value) = watch::channel(true);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&requests);
        let mut drawer = drawer(|| Ok(None)).with_open_state(ControlledOpen::new(value, move |open| {
            sink.lock().unwrap().push(open);
        }));
        drawer.form_mut().set_value("domain", "example.com");

        let commands = drawer.submit();
        owner.send_replace(false);
        drawer.update();
        assert!(!drawer.is_pending());

        run(commands).await;
        drawer.update();
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ok_while_closed_is_ignored() {
        let mut drawer = drawer(|| Ok(None));
        drawer.form_mut().set_value("domain", "example.com");

        assert!(drawer.submit().is_empty());
        assert!(!drawer.is_pending());

        drawer.queue(DrawerMsg::Ok);
        assert!(drawer.update().is_empty());
        assert!(!drawer.is_pending());
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_config_keeps_injected_open_state() {
        let config = DrawerConfig {
            default_open: true,
            ..DrawerConfig::default()
        };

        for config_first in [false, true] {
            let (owner, value) = watch::channel(false);
            let requests = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&requests);
            let mirror = ControlledOpen::new(value, move |open| sink.lock().unwrap().push(open));

            let mut drawer = if config_first {
                drawer(|| Ok(None)).with_config(&config).with_open_state(mirror)
            } else {
                drawer(|| Ok(None)).with_open_state(mirror).with_config(&config)
            };
            assert!(!drawer.is_open());

            drawer.request_open_change(true);
            assert!(!drawer.is_open(), "only the owner opens a controlled drawer");
            assert_eq!(*requests.lock().unwrap(), vec![true]);

            owner.send_replace(true);
            drawer.update();
            assert!(drawer.is_open());
        }
    }

    #[test]
    fn test_on_open_change_survives_config() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let mut drawer = drawer(|| Ok(None))
            .on_open_change(move |open| sink.lock().unwrap().push(open))
            .with_config(&DrawerConfig::default());

        drawer.handle_key(key(KeyCode::Char('n')));
        drawer.update();
        drawer.handle_key(key(KeyCode::Esc));
        drawer.update();
        drawer.request_close();

        assert_eq!(*changes.lock().unwrap(), vec![true, false]);
    }
}
