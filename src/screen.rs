//! Deploy-node screen.
//!
//! Shows a workflow node's CDN configuration and hosts the drawer that edits
//! it. In controlled mode the screen owns the drawer's visibility: change
//! requests arrive as notifications and are mirrored back through a watch
//! channel.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::watch;
use tracing::debug;

use crate::Theme;
use crate::command::UpdateResult;
use crate::config::{DrawerConfig, GlobalAction, KeyResolver};
use crate::drawer::{ClosePolicy, ControlledOpen, DrawerForm, Trigger};
use crate::form::FieldForm;
use crate::provider::tencentcloud_cdn::{self, CdnEvent, DeployHandler, TencentCdnConfig};
use crate::ui::{Component, ToastManager};

/// How the screen sets up its drawer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenOptions {
    /// The screen owns the open state.
    pub controlled: bool,
    /// Start with the drawer open.
    pub open: bool,
    /// Keep field values across close/reopen.
    pub preserve: bool,
    /// Simulated latency of the deploy call.
    pub latency: Duration,
}

pub struct DeployNodeScreen {
    node_name: String,
    config: Option<TencentCdnConfig>,
    drawer: DrawerForm<FieldForm>,
    /// Owner-side value of a controlled drawer.
    mirror: Option<watch::Sender<bool>>,
    open_rx: UnboundedReceiver<bool>,
    cdn_rx: UnboundedReceiver<CdnEvent>,
    toasts: ToastManager,
    resolver: Arc<KeyResolver>,
}

impl DeployNodeScreen {
    pub fn new(
        node_name: impl Into<String>,
        options: ScreenOptions,
        config: &DrawerConfig,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let (cdn_tx, cdn_rx) = mpsc::unbounded_channel();
        let (open_tx, open_rx) = mpsc::unbounded_channel();

        let trigger = Trigger::new(
            "Configure CDN",
            resolver.global_binding(GlobalAction::Configure).clone(),
        )
        .on_activate(|| debug!("CDN trigger activated"));

        let mut drawer = DrawerForm::new(
            tencentcloud_cdn::form(None),
            DeployHandler::new(options.latency, cdn_tx),
            Arc::clone(&resolver),
        )
        .with_config(config)
        .with_title(tencentcloud_cdn::TITLE)
        .with_trigger(trigger)
        .after_open_change(|open| debug!(open, "CDN drawer settled"));

        if options.preserve {
            drawer = drawer.with_close_policy(ClosePolicy::from_options(
                Some(true),
                config.destroy_on_close,
            ));
        }

        let initially_open = options.open || config.default_open;
        let mirror = if options.controlled {
            let (mirror, value) = watch::channel(initially_open);
            drawer = drawer.with_open_state(ControlledOpen::new(value, move |next| {
                let _ = open_tx.send(next);
            }));
            Some(mirror)
        } else {
            drawer = drawer
                .default_open(initially_open)
                .on_open_change(|open| debug!(open, "CDN drawer open change"));
            None
        };

        Self {
            node_name: node_name.into(),
            config: None,
            drawer,
            mirror,
            open_rx,
            cdn_rx,
            toasts: ToastManager::new(),
            resolver,
        }
    }

    pub const fn config(&self) -> Option<&TencentCdnConfig> {
        self.config.as_ref()
    }

    pub const fn drawer(&self) -> &DrawerForm<FieldForm> {
        &self.drawer
    }

    pub const fn drawer_mut(&mut self) -> &mut DrawerForm<FieldForm> {
        &mut self.drawer
    }

    pub const fn is_controlled(&self) -> bool {
        self.mirror.is_some()
    }

    /// Force the drawer's visibility as its owner.
    ///
    /// Only a controlled drawer can be forced; the change bypasses the
    /// pending guard the same way any owner-side change does.
    pub fn set_open(&mut self, open: bool) {
        if let Some(mirror) = &self.mirror {
            mirror.send_replace(open);
        }
    }

    /// Returns `true` if the key was consumed. The caller then calls `update()`.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.drawer.handle_key(key)
    }

    pub fn handle_tick(&mut self) {
        self.drawer.handle_tick();
        self.toasts.handle_tick();
    }

    /// Apply submission side effects and drive the drawer.
    pub fn update(&mut self) -> UpdateResult {
        self.apply_events();
        let mut result = self.drawer.update();
        while self.apply_events() {
            result = result.merge(self.drawer.update());
        }
        result
    }

    /// Returns `true` if the owner-side open value changed.
    fn apply_events(&mut self) -> bool {
        while let Ok(event) = self.cdn_rx.try_recv() {
            match event {
                CdnEvent::Toast(toast) => self.toasts.show(toast),
                CdnEvent::Saved(config) => {
                    self.drawer.form_mut().set_initial_values(config.to_values());
                    self.config = Some(config);
                }
            }
        }

        let mut changed = false;
        while let Ok(next) = self.open_rx.try_recv() {
            if let Some(mirror) = &self.mirror {
                debug!(next, "Mirroring open change");
                changed |= mirror.send_replace(next) != next;
            }
        }
        changed
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [header, body, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("Deploy node ", Style::default().fg(theme.subtext0())),
            Span::styled(
                self.node_name.clone(),
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.surface1())),
        );
        frame.render_widget(title, header);

        let block = Block::default()
            .title(format!(" {} ", tencentcloud_cdn::TITLE))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.overlay0()));
        let inner = block.inner(body);
        frame.render_widget(block, body);

        let [domain_area, _, trigger_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .margin(1)
        .areas(inner);

        let domain = match &self.config {
            Some(config) => Span::styled(config.domain.clone(), Style::default().fg(theme.green())),
            None => Span::styled("not configured", Style::default().fg(theme.overlay1())),
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Domain: ", Style::default().fg(theme.subtext1())),
                domain,
            ])),
            domain_area,
        );
        self.drawer.render_trigger(frame, trigger_area, theme);

        let mode = if self.is_controlled() {
            "controlled"
        } else {
            "uncontrolled"
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("[{}]", self.resolver.display_global(GlobalAction::Quit)),
                    Style::default().fg(theme.peach()),
                ),
                Span::styled(
                    format!(" Quit  ({mode})"),
                    Style::default().fg(theme.overlay1()),
                ),
            ])),
            help,
        );

        self.drawer.render(frame, area, theme);
        self.toasts.render(frame, area, theme);
    }
}
