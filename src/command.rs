//! Async command pattern for side effects.
//!
//! Commands represent async operations that run outside the main event loop.
//! The drawer returns commands from `update()`, and the App spawns them so
//! the UI keeps rendering while they run.

use async_trait::async_trait;

/// Async command that performs side effects.
///
/// Commands report their results back to their owner through a channel,
/// never through the return value.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> String;

    /// Execute the command.
    async fn execute(self: Box<Self>) -> color_eyre::Result<()>;
}

/// Result of a single-funnel `update()` call.
pub enum UpdateResult {
    /// No action needed
    Idle,
    /// Spawn these commands
    Commands(Vec<Box<dyn Command>>),
}

impl UpdateResult {
    /// Combine two results, keeping every command.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Idle, other) => other,
            (this, Self::Idle) => this,
            (Self::Commands(mut a), Self::Commands(b)) => {
                a.extend(b);
                Self::Commands(a)
            }
        }
    }

    /// Number of commands carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Commands(commands) => commands.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_commands(self) -> Vec<Box<dyn Command>> {
        match self {
            Self::Idle => Vec::new(),
            Self::Commands(commands) => commands,
        }
    }
}

impl<T: Command> From<T> for UpdateResult {
    fn from(value: T) -> Self {
        Self::Commands(vec![Box::new(value)])
    }
}
