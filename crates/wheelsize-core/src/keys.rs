//! Virtual-key codes for the resize modifiers.
//!
//! Config files may name a key (`"Ctrl"`, `"Alt"`, `"F9"`) or give the raw
//! Windows virtual-key code (`17`, `"0x11"`). Known codes are written back as
//! names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Windows virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "KeyRepr", into = "KeyRepr")]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const SHIFT: Self = Self(0x10);
    pub const CONTROL: Self = Self(0x11);
    pub const ALT: Self = Self(0x12);
    pub const CAPS_LOCK: Self = Self(0x14);
    pub const SPACE: Self = Self(0x20);
    pub const LEFT_WIN: Self = Self(0x5B);
    pub const RIGHT_WIN: Self = Self(0x5C);
    pub const LEFT_SHIFT: Self = Self(0xA0);
    pub const RIGHT_SHIFT: Self = Self(0xA1);
    pub const LEFT_CONTROL: Self = Self(0xA2);
    pub const RIGHT_CONTROL: Self = Self(0xA3);
    pub const LEFT_ALT: Self = Self(0xA4);
    pub const RIGHT_ALT: Self = Self(0xA5);

    /// Raw virtual-key code.
    pub fn code(self) -> u16 {
        self.0
    }

    /// Look up a key by name (case-insensitive) or by numeric code.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
        {
            return u16::from_str_radix(hex, 16).ok().map(Self);
        }
        if let Ok(code) = input.parse::<u16>() {
            return Some(Self(code));
        }

        let lower = input.to_ascii_lowercase();
        if let Some((_, key)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&lower))
        {
            return Some(*key);
        }

        // Letter keys map to their ASCII uppercase code. Bare digits were
        // already taken as raw codes above.
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return Some(Self(c.to_ascii_uppercase() as u16));
            }
        }

        // Function keys F1..F24 are contiguous from 0x70.
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u16>().ok()) {
            if (1..=24).contains(&n) {
                return Some(Self(0x6F + n));
            }
        }

        None
    }

    /// Canonical name of the key, if it has one.
    pub fn name(self) -> Option<String> {
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, key)| *key == self) {
            return Some((*name).to_string());
        }
        match self.0 {
            0x41..=0x5A => Some(char::from(self.0 as u8).to_string()),
            0x70..=0x87 => Some(format!("F{}", self.0 - 0x6F)),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(&name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

/// Canonical names first; later entries are accepted aliases.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Ctrl", KeyCode::CONTROL),
    ("Alt", KeyCode::ALT),
    ("Shift", KeyCode::SHIFT),
    ("LCtrl", KeyCode::LEFT_CONTROL),
    ("RCtrl", KeyCode::RIGHT_CONTROL),
    ("LAlt", KeyCode::LEFT_ALT),
    ("RAlt", KeyCode::RIGHT_ALT),
    ("LShift", KeyCode::LEFT_SHIFT),
    ("RShift", KeyCode::RIGHT_SHIFT),
    ("LWin", KeyCode::LEFT_WIN),
    ("RWin", KeyCode::RIGHT_WIN),
    ("CapsLock", KeyCode::CAPS_LOCK),
    ("Space", KeyCode::SPACE),
    ("Control", KeyCode::CONTROL),
    ("Menu", KeyCode::ALT),
    ("AltGr", KeyCode::RIGHT_ALT),
    ("Win", KeyCode::LEFT_WIN),
    ("Meta", KeyCode::LEFT_WIN),
];

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Code(u16),
    Name(String),
}

impl TryFrom<KeyRepr> for KeyCode {
    type Error = String;

    fn try_from(repr: KeyRepr) -> Result<Self, Self::Error> {
        match repr {
            KeyRepr::Code(code) => Ok(KeyCode(code)),
            KeyRepr::Name(name) => {
                KeyCode::parse(&name).ok_or_else(|| format!("unknown key: {name:?}"))
            }
        }
    }
}

impl From<KeyCode> for KeyRepr {
    fn from(key: KeyCode) -> Self {
        match key.name() {
            Some(name) => KeyRepr::Name(name),
            None => KeyRepr::Code(key.0),
        }
    }
}
