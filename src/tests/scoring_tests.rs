#![cfg(test)]

use crate::scoring::{GameState, ScoreEvent, ScoringRules, default_level_curve, line_clear_points};

#[test]
fn test_line_clear_table() {
    assert_eq!(line_clear_points(0), 0);
    assert_eq!(line_clear_points(1), 100);
    assert_eq!(line_clear_points(2), 300);
    assert_eq!(line_clear_points(3), 500);
    assert_eq!(line_clear_points(4), 800);
    assert_eq!(line_clear_points(5), 800);
}

#[test]
fn test_drop_points() {
    let rules = ScoringRules::default();
    let mut state = GameState::default();

    assert_eq!(state.apply(ScoreEvent::SoftDrop { cells: 3 }, &rules), 3);
    assert_eq!(state.apply(ScoreEvent::HardDrop { cells: 10 }, &rules), 20);
    assert_eq!(state.score, 23);
}

#[test]
fn test_first_clear_has_no_combo_bonus() {
    let rules = ScoringRules::default();
    let mut state = GameState::default();

    assert_eq!(state.apply(ScoreEvent::Lock { lines: 1 }, &rules), 100);
    assert_eq!(state.combo, 1);
    assert_eq!(state.lines_cleared, 1);
}

#[test]
fn test_combo_law() {
    let rules = ScoringRules::default();
    let mut state = GameState::default();

    state.apply(ScoreEvent::Lock { lines: 1 }, &rules);
    // Second consecutive clear earns bonus for the one-deep chain
    assert_eq!(state.apply(ScoreEvent::Lock { lines: 2 }, &rules), 300 + 50);
    assert_eq!(state.combo, 2);
    assert_eq!(state.apply(ScoreEvent::Lock { lines: 1 }, &rules), 100 + 100);
    assert_eq!(state.combo, 3);

    // A dry lock breaks the chain and scores nothing
    assert_eq!(state.apply(ScoreEvent::Lock { lines: 0 }, &rules), 0);
    assert_eq!(state.combo, 0);
    assert_eq!(state.apply(ScoreEvent::Lock { lines: 1 }, &rules), 100);
}

#[test]
fn test_custom_combo_bonus() {
    let rules = ScoringRules {
        combo_bonus: 0,
        ..ScoringRules::default()
    };
    let mut state = GameState::default();
    state.apply(ScoreEvent::Lock { lines: 1 }, &rules);
    assert_eq!(state.apply(ScoreEvent::Lock { lines: 1 }, &rules), 100);
}

#[test]
fn test_hold_cannot_go_negative() {
    let rules = ScoringRules::default();
    let mut state = GameState::default();

    state.apply(ScoreEvent::SoftDrop { cells: 1 }, &rules);
    assert_eq!(state.apply(ScoreEvent::Hold, &rules), -1);
    assert_eq!(state.score, 0);
    assert_eq!(state.apply(ScoreEvent::Hold, &rules), 0);
    assert_eq!(state.score, 0);

    state.apply(ScoreEvent::HardDrop { cells: 5 }, &rules);
    assert_eq!(state.apply(ScoreEvent::Hold, &rules), -2);
    assert_eq!(state.score, 8);
}

#[test]
fn test_level_curve() {
    assert_eq!(default_level_curve(0), 1);
    assert_eq!(default_level_curve(9), 1);
    assert_eq!(default_level_curve(10), 2);
    assert_eq!(default_level_curve(10_000), 30);

    let rules = ScoringRules::default();
    let mut state = GameState::default();
    for _ in 0..3 {
        state.apply(ScoreEvent::Lock { lines: 4 }, &rules);
    }
    assert_eq!(state.lines_cleared, 12);
    assert_eq!(state.level, 2);
}

#[test]
fn test_pluggable_level_curve() {
    fn every_line(lines: u32) -> u32 {
        lines + 1
    }
    let rules = ScoringRules {
        level_curve: every_line,
        ..ScoringRules::default()
    };
    let mut state = GameState::default();
    state.apply(ScoreEvent::Lock { lines: 3 }, &rules);
    assert_eq!(state.level, 4);

    state.reset();
    assert_eq!(state, GameState::default());
}
