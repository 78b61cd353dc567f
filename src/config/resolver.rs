use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{DrawerAction, GlobalAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to configured actions.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    pub fn global_binding(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Configure => &kb.configure,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global_binding(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global_binding(action).display()
    }

    pub fn drawer_binding(&self, action: DrawerAction) -> &KeyBinding {
        let kb = &self.keybindings.drawer;
        match action {
            DrawerAction::Ok => &kb.ok,
            DrawerAction::Cancel => &kb.cancel,
            DrawerAction::Dismiss => &kb.dismiss,
        }
    }

    pub fn matches_drawer(&self, event: &KeyEvent, action: DrawerAction) -> bool {
        self.drawer_binding(action).matches(event)
    }

    pub fn display_drawer(&self, action: DrawerAction) -> String {
        self.drawer_binding(action).display()
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}
