use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::components::{Direction, Rotation};
use crate::input::{Action, KeyBindings};

// Key names as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub down: Vec<String>,
    pub rotate_clockwise: Vec<String>,
    pub rotate_counterclockwise: Vec<String>,
    pub hold: Vec<String>,
    pub quit: Vec<String>,
}

fn names(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| (*key).to_string()).collect()
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            left: names(&["Left"]),
            right: names(&["Right"]),
            down: names(&["Down"]),
            rotate_clockwise: names(&["d"]),
            rotate_counterclockwise: names(&["a"]),
            hold: names(&["c"]),
            quit: names(&["q", "Esc"]),
        }
    }
}

impl KeyConfig {
    /// Parses every key name into a lookup table.
    pub fn resolve(&self) -> Result<KeyBindings, ConfigError> {
        let groups = [
            (&self.left, Action::Shift(Direction::Left)),
            (&self.right, Action::Shift(Direction::Right)),
            (&self.down, Action::Shift(Direction::Down)),
            (&self.rotate_clockwise, Action::Rotate(Rotation::Clockwise)),
            (
                &self.rotate_counterclockwise,
                Action::Rotate(Rotation::CounterClockwise),
            ),
            (&self.hold, Action::Hold),
            (&self.quit, Action::Quit),
        ];

        let mut bindings = KeyBindings::default();
        for (keys, action) in groups {
            for name in keys {
                bindings.bind(parse_key(name)?, action);
            }
        }
        Ok(bindings)
    }
}

/// Parses a named key (`Left`, `Esc`, `Space`, ...) or a single character.
pub fn parse_key(name: &str) -> Result<KeyCode, ConfigError> {
    let code = match name {
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Esc" => KeyCode::Esc,
        "Enter" => KeyCode::Enter,
        "Space" => KeyCode::Char(' '),
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(ConfigError::InvalidKey(name.to_string())),
            }
        }
    };
    Ok(code)
}
