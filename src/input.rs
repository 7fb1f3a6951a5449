#![warn(clippy::all, clippy::pedantic)]

use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::app::MovementSpeed;
use crate::config::loader::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    DropHard,
    RotateClockwise,
    RotateCounterClockwise,
    Hold,
}

// Discrete events handed from the input pump to the logic loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Action(Action),
    TogglePause,
    Quit,
    Restart,
    CycleSoundtrack,
    ToggleSpeed(MovementSpeed),
    VolumeUp,
    VolumeDown,
}

/// Key names for every binding, e.g. `"Left"`, `"Space"`, `"z"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keymap {
    pub move_piece_left: String,
    pub move_piece_right: String,
    pub rotate_clockwise: String,
    pub rotate_counter_clockwise: String,
    pub drop_soft: String,
    pub drop_hard: String,
    pub hold: String,
    pub pause: String,
    pub quit: String,
    pub restart: String,
    pub next_soundtrack: String,
    pub fast_fall: String,
    pub slow_fall: String,
    pub volume_up: String,
    pub volume_down: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            move_piece_left: "Left".into(),
            move_piece_right: "Right".into(),
            rotate_clockwise: "Up".into(),
            rotate_counter_clockwise: "z".into(),
            drop_soft: "Down".into(),
            drop_hard: "Space".into(),
            hold: "c".into(),
            pause: "p".into(),
            quit: "q".into(),
            restart: "r".into(),
            next_soundtrack: "m".into(),
            fast_fall: "f".into(),
            slow_fall: "s".into(),
            volume_up: "+".into(),
            volume_down: "-".into(),
        }
    }
}

/// Parses a key name from the config file.
#[must_use]
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Space" => KeyCode::Char(' '),
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        _ => {
            if let Some(n) = name.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
                return None;
            }
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

impl Keymap {
    fn bindings(&self) -> [(&str, InputEvent); 15] {
        [
            (self.move_piece_left.as_str(), InputEvent::Action(Action::MoveLeft)),
            (self.move_piece_right.as_str(), InputEvent::Action(Action::MoveRight)),
            (self.rotate_clockwise.as_str(), InputEvent::Action(Action::RotateClockwise)),
            (
                self.rotate_counter_clockwise.as_str(),
                InputEvent::Action(Action::RotateCounterClockwise),
            ),
            (self.drop_soft.as_str(), InputEvent::Action(Action::MoveDown)),
            (self.drop_hard.as_str(), InputEvent::Action(Action::DropHard)),
            (self.hold.as_str(), InputEvent::Action(Action::Hold)),
            (self.pause.as_str(), InputEvent::TogglePause),
            (self.quit.as_str(), InputEvent::Quit),
            (self.restart.as_str(), InputEvent::Restart),
            (self.next_soundtrack.as_str(), InputEvent::CycleSoundtrack),
            (self.fast_fall.as_str(), InputEvent::ToggleSpeed(MovementSpeed::SoftDrop)),
            (self.slow_fall.as_str(), InputEvent::ToggleSpeed(MovementSpeed::Hold)),
            (self.volume_up.as_str(), InputEvent::VolumeUp),
            (self.volume_down.as_str(), InputEvent::VolumeDown),
        ]
    }

    /// Event bound to `code`, if any.
    #[must_use]
    pub fn event_for(&self, code: KeyCode) -> Option<InputEvent> {
        self.bindings()
            .into_iter()
            .find(|(name, _)| parse_key(name) == Some(code))
            .map(|(_, event)| event)
    }

    /// Every key must parse and no key may be bound twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<KeyCode> = Vec::new();
        for (name, _) in self.bindings() {
            let code = parse_key(name)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown key name {name:?}")))?;
            if seen.contains(&code) {
                return Err(ConfigError::Invalid(format!("key {name:?} is bound twice")));
            }
            seen.push(code);
        }
        Ok(())
    }
}
