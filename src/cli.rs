use std::time::Duration;

use clap::Parser;

use crate::screen::ScreenOptions;

#[derive(Parser, Debug)]
#[command(
    name = "drawerform",
    version,
    about = "Configure a deploy node's CDN from a slide-out drawer form"
)]
pub struct Args {
    /// Let the screen own the drawer's open state
    #[arg(long)]
    pub controlled: bool,

    /// Start with the drawer open
    #[arg(long)]
    pub open: bool,

    /// Keep field values when the drawer closes
    #[arg(long)]
    pub preserve: bool,

    /// Simulated latency of the deploy call, in milliseconds
    #[arg(long, default_value_t = 800)]
    pub latency_ms: u64,

    /// Theme name (e.g., "Catppuccin Latte"), overrides the config file
    #[arg(long)]
    pub theme: Option<String>,
}

impl Args {
    pub const fn screen_options(&self) -> ScreenOptions {
        ScreenOptions {
            controlled: self.controlled,
            open: self.open,
            preserve: self.preserve,
            latency: Duration::from_millis(self.latency_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["drawerform", "--controlled", "--latency-ms", "10"]);
        let options = args.screen_options();
        assert!(options.controlled);
        assert!(!options.open);
        assert_eq!(options.latency, Duration::from_millis(10));
        assert!(args.theme.is_none());
    }
}
