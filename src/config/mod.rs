pub mod actions;
mod defaults;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
pub use key::{Key, KeyBinding};
pub use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Defaults applied to every drawer built with `DrawerForm::with_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    /// Panel width as a percentage of the terminal width.
    pub width_percent: u16,
    /// Initial visibility in uncontrolled mode.
    pub default_open: bool,
    /// Keep field values across close/reopen.
    pub preserve_fields: bool,
    /// Destroying the panel on close always clears fields.
    pub destroy_on_close: bool,
    pub ok_text: String,
    pub cancel_text: String,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            width_percent: 40,
            default_open: false,
            preserve_fields: false,
            destroy_on_close: false,
            ok_text: "Ok".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Ticks per second for animations.
    pub tick_rate: f64,
    /// Frames per second for rendering.
    pub frame_rate: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate: 8.0,
            frame_rate: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub drawer: DrawerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [drawer]
            width_percent = 60
            preserve_fields = true

            [keybindings.drawer]
            ok = "ctrl+Enter"
            "#,
        )
        .unwrap();

        assert_eq!(config.drawer.width_percent, 60);
        assert!(config.drawer.preserve_fields);
        assert_eq!(config.drawer.ok_text, "Ok");
        assert_eq!(config.keybindings.drawer.ok.display(), "ctrl+Enter");
        assert_eq!(config.keybindings.drawer.dismiss.display(), "Esc");
        assert_eq!(config.keybindings.global.quit.display(), "q");
    }
}
