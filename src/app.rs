use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::Theme;
use crate::command::UpdateResult;
use crate::config::{AppConfig, GlobalAction, KeyResolver};
use crate::screen::{DeployNodeScreen, ScreenOptions};
use crate::tui::{Event, Tui};

/// A spawned command that has finished.
struct CommandDone {
    name: String,
    result: color_eyre::Result<()>,
}

pub struct App {
    screen: DeployNodeScreen,
    config: Arc<AppConfig>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    should_quit: bool,
    should_suspend: bool,
    done_tx: UnboundedSender<CommandDone>,
    done_rx: UnboundedReceiver<CommandDone>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        resolver: Arc<KeyResolver>,
        theme: Theme,
        options: ScreenOptions,
    ) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let screen = DeployNodeScreen::new(
            "cdn-deploy",
            options,
            &config.drawer,
            Arc::clone(&resolver),
        );
        Self {
            screen,
            config,
            resolver,
            theme,
            should_quit: false,
            should_suspend: false,
            done_tx,
            done_rx,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(&self.config.ui)?;
        tui.enter()?;

        loop {
            tokio::select! {
                event = tui.next_event() => match event {
                    Some(event) => self.handle_event(&mut tui, event)?,
                    None => break,
                },
                Some(done) = self.done_rx.recv() => self.handle_command_done(done),
            }

            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.resume()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Exiting");
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Init => {
                let result = self.screen.update();
                self.spawn_commands(result);
            }
            Event::Quit => self.should_quit = true,
            Event::Suspend => self.should_suspend = true,
            Event::Error(error) => warn!(error = %error, "Terminal event error"),
            Event::Tick => self.screen.handle_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => {
                if self.screen.handle_key(key) {
                    let result = self.screen.update();
                    self.spawn_commands(result);
                } else if self.resolver.matches_global(&key, GlobalAction::Quit) {
                    self.should_quit = true;
                }
            }
        }
        Ok(())
    }

    fn handle_command_done(&mut self, done: CommandDone) {
        match done.result {
            Ok(()) => debug!(command = %done.name, "Command finished"),
            Err(error) => warn!(command = %done.name, error = %error, "Command failed"),
        }
        let result = self.screen.update();
        self.spawn_commands(result);
    }

    fn spawn_commands(&self, result: UpdateResult) {
        for command in result.into_commands() {
            let done_tx = self.done_tx.clone();
            tokio::spawn(async move {
                let name = command.name();
                debug!(command = %name, "Spawning command");
                let result = command.execute().await;
                let _ = done_tx.send(CommandDone { name, result });
            });
        }
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(Style::default().bg(self.theme.base()).fg(self.theme.text())),
                area,
            );
            self.screen.render(frame, area, &self.theme);
        })?;
        Ok(())
    }
}
