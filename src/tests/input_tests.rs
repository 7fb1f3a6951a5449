#![cfg(test)]

use crossterm::event::KeyCode;

use crate::app::MovementSpeed;
use crate::input::{Action, InputEvent, Keymap, parse_key};

#[test]
fn test_parse_key_names() {
    assert_eq!(parse_key("Left"), Some(KeyCode::Left));
    assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
    assert_eq!(parse_key("F5"), Some(KeyCode::F(5)));
    assert_eq!(parse_key("z"), Some(KeyCode::Char('z')));
    assert_eq!(parse_key("+"), Some(KeyCode::Char('+')));
    assert_eq!(parse_key("F13"), None);
    assert_eq!(parse_key("Nope"), None);
    assert_eq!(parse_key(""), None);
}

#[test]
fn test_default_keymap_lookup() {
    let keymap = Keymap::default();
    assert!(keymap.validate().is_ok());

    assert_eq!(
        keymap.event_for(KeyCode::Left),
        Some(InputEvent::Action(Action::MoveLeft))
    );
    assert_eq!(
        keymap.event_for(KeyCode::Char(' ')),
        Some(InputEvent::Action(Action::DropHard))
    );
    assert_eq!(
        keymap.event_for(KeyCode::Char('f')),
        Some(InputEvent::ToggleSpeed(MovementSpeed::SoftDrop))
    );
    assert_eq!(keymap.event_for(KeyCode::Char('q')), Some(InputEvent::Quit));
    assert_eq!(keymap.event_for(KeyCode::Char('y')), None);
}

#[test]
fn test_rebound_key() {
    let keymap = Keymap {
        hold: "Tab".into(),
        ..Keymap::default()
    };
    assert_eq!(
        keymap.event_for(KeyCode::Tab),
        Some(InputEvent::Action(Action::Hold))
    );
    assert_eq!(keymap.event_for(KeyCode::Char('c')), None);
}

#[test]
fn test_validate_rejects_duplicates_and_unknown_names() {
    let duplicate = Keymap {
        pause: "q".into(),
        ..Keymap::default()
    };
    assert!(duplicate.validate().is_err());

    let unknown = Keymap {
        restart: "Home".into(),
        ..Keymap::default()
    };
    assert!(unknown.validate().is_err());
}
