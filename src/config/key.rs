use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single key chord, e.g. `ctrl+s` or `Esc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Named keys accepted in config files, with their display names first.
const NAMED_KEYS: &[(&str, &[&str], KeyCode)] = &[
    ("Enter", &["enter", "return"], KeyCode::Enter),
    ("Esc", &["esc", "escape"], KeyCode::Esc),
    ("Tab", &["tab"], KeyCode::Tab),
    ("BackTab", &["backtab"], KeyCode::BackTab),
    ("Backspace", &["backspace"], KeyCode::Backspace),
    ("Delete", &["delete", "del"], KeyCode::Delete),
    ("Insert", &["insert", "ins"], KeyCode::Insert),
    ("Home", &["home"], KeyCode::Home),
    ("End", &["end"], KeyCode::End),
    ("PageUp", &["pageup", "pgup"], KeyCode::PageUp),
    ("PageDown", &["pagedown", "pgdn"], KeyCode::PageDown),
    ("Up", &["up"], KeyCode::Up),
    ("Down", &["down"], KeyCode::Down),
    ("Left", &["left"], KeyCode::Left),
    ("Right", &["right"], KeyCode::Right),
    ("Space", &["space"], KeyCode::Char(' ')),
];

impl Key {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            // Terminals disagree on whether Shift is reported for uppercase
            // letters, so Shift only matters through the character itself.
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                let ignore_shift = !KeyModifiers::SHIFT;
                let same_char = if self.modifiers.contains(KeyModifiers::CONTROL) {
                    a.eq_ignore_ascii_case(&b)
                } else {
                    a == b
                };
                same_char
                    && (self.modifiers & ignore_shift) == (event.modifiers & ignore_shift)
            }
            (KeyCode::BackTab, KeyCode::BackTab) => {
                (self.modifiers | KeyModifiers::SHIFT) == (event.modifiers | KeyModifiers::SHIFT)
            }
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        for (modifier, name) in [
            (KeyModifiers::CONTROL, "ctrl"),
            (KeyModifiers::ALT, "alt"),
            (KeyModifiers::SHIFT, "shift"),
        ] {
            if self.modifiers.contains(modifier) {
                parts.push(name.to_string());
            }
        }

        let named = NAMED_KEYS
            .iter()
            .find(|(_, _, code)| *code == self.code)
            .map(|(display, _, _)| (*display).to_string());
        let key = named.unwrap_or_else(|| match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        });

        parts.push(key);
        parts.join("+")
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // A trailing '+' is the plus key itself, e.g. "ctrl++"
        let (prefix, key_part) = match s.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None => match s.rsplit_once('+') {
                Some((prefix, key)) => (Some(prefix), key),
                None => (None, s),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.into_iter().flat_map(|p| p.split('+')) {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {part}")),
            };
        }

        let lower = key_part.to_lowercase();
        let code = if let Some((_, _, code)) = NAMED_KEYS
            .iter()
            .find(|(_, aliases, _)| aliases.contains(&lower.as_str()))
        {
            *code
        } else {
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                // Single characters keep their case: "G" and "g" differ
                (Some(c), None) => KeyCode::Char(c),
                (Some('f' | 'F'), Some(_)) => key_part[1..]
                    .parse()
                    .map(KeyCode::F)
                    .map_err(|_| format!("Invalid function key: {key_part}"))?,
                _ => return Err(format!("Unknown key: {key_part}")),
            }
        };

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One or more keys bound to the same action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(Key),
    Multiple(Vec<Key>),
}

impl KeyBinding {
    pub const fn multiple(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Single(key) => key.matches(event),
            Self::Multiple(keys) => keys.iter().any(|k| k.matches(event)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Single(key) => key.display(),
            Self::Multiple(keys) => keys.iter().map(Key::display).collect::<Vec<_>>().join("/"),
        }
    }
}

impl From<Key> for KeyBinding {
    fn from(key: Key) -> Self {
        Self::Single(key)
    }
}

impl From<Vec<Key>> for KeyBinding {
    fn from(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_str("q").unwrap(), Key::new(KeyCode::Char('q')));
        assert_eq!(Key::from_str("Enter").unwrap(), Key::new(KeyCode::Enter));
        assert_eq!(Key::from_str("escape").unwrap(), Key::new(KeyCode::Esc));
        assert_eq!(
            Key::from_str("ctrl+s").unwrap(),
            Key::with_ctrl(KeyCode::Char('s'))
        );
        assert_eq!(Key::from_str("F5").unwrap(), Key::new(KeyCode::F(5)));
        assert_eq!(Key::from_str("ctrl++").unwrap(), Key::with_ctrl(KeyCode::Char('+')));
        assert!(Key::from_str("hyper+x").is_err());
        assert!(Key::from_str("nope").is_err());
    }

    #[test]
    fn test_key_display_round_trips() {
        for text in ["q", "Enter", "ctrl+x", "shift+Tab", "F1", "Space"] {
            assert_eq!(Key::from_str(text).unwrap().display(), text);
        }
    }

    #[test]
    fn test_uppercase_key_matches_with_or_without_shift() {
        let key = Key::new(KeyCode::Char('G'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_ctrl_chord_matches() {
        let key = Key::with_ctrl(KeyCode::Char('s'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_binding_from_list() {
        let binding: KeyBinding = toml::from_str::<toml::Value>(r#"keys = ["n", "Enter"]"#)
            .unwrap()["keys"]
            .clone()
            .try_into()
            .unwrap();
        assert!(binding.matches(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(binding.display(), "n/Enter");
    }
}
