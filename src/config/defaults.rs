use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{DrawerKeybindings, GlobalKeybindings};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            configure: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('n')),
                Key::new(KeyCode::Enter),
            ]),
        }
    }
}

impl Default for DrawerKeybindings {
    fn default() -> Self {
        Self {
            ok: Key::with_ctrl(KeyCode::Char('s')).into(),
            cancel: Key::with_ctrl(KeyCode::Char('x')).into(),
            dismiss: Key::new(KeyCode::Esc).into(),
        }
    }
}
