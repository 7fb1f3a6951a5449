#![warn(clippy::all, clippy::pedantic)]

use log::debug;

use crate::game::{
    LINES_PER_LEVEL, MAX_LEVEL, POINTS_COMBO_MULTIPLIER, POINTS_DOUBLE, POINTS_HARD_DROP,
    POINTS_HOLD, POINTS_QUAD, POINTS_SINGLE, POINTS_SOFT_DROP, POINTS_TRIPLE, STARTING_LEVEL,
};

/// Maps total lines cleared to a level.
pub type LevelCurve = fn(u32) -> u32;

#[must_use]
pub fn default_level_curve(lines_cleared: u32) -> u32 {
    (STARTING_LEVEL + lines_cleared / LINES_PER_LEVEL).min(MAX_LEVEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    SoftDrop { cells: u32 },
    HardDrop { cells: u32 },
    Hold,
    Lock { lines: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringRules {
    pub combo_bonus: u32,
    pub level_curve: LevelCurve,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            combo_bonus: POINTS_COMBO_MULTIPLIER,
            level_curve: default_level_curve,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u64,
    pub combo: u32,
    pub level: u32,
    pub lines_cleared: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            level: STARTING_LEVEL,
            lines_cleared: 0,
        }
    }
}

/// Base points for a clear of `lines` rows. Anything past four rows scores as
/// a quad since no piece is taller than four cells.
#[must_use]
pub fn line_clear_points(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1 => POINTS_SINGLE,
        2 => POINTS_DOUBLE,
        3 => POINTS_TRIPLE,
        _ => POINTS_QUAD,
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies a scoring event and returns the score delta actually applied.
    pub fn apply(&mut self, event: ScoreEvent, rules: &ScoringRules) -> i64 {
        let delta = match event {
            ScoreEvent::SoftDrop { cells } => POINTS_SOFT_DROP * i64::from(cells),
            ScoreEvent::HardDrop { cells } => POINTS_HARD_DROP * i64::from(cells),
            ScoreEvent::Hold => POINTS_HOLD,
            ScoreEvent::Lock { lines: 0 } => {
                // A lock without a clear breaks the combo chain
                self.combo = 0;
                0
            }
            ScoreEvent::Lock { lines } => {
                let bonus = rules.combo_bonus.saturating_mul(self.combo);
                self.combo += 1;
                self.lines_cleared += u32::try_from(lines).unwrap_or(u32::MAX);
                let level = (rules.level_curve)(self.lines_cleared);
                if level != self.level {
                    debug!("Level {} -> {}", self.level, level);
                    self.level = level;
                }
                i64::from(line_clear_points(lines).saturating_add(bonus))
            }
        };
        self.add_score(delta)
    }

    // Score never goes below zero; returns the delta that was really applied.
    fn add_score(&mut self, delta: i64) -> i64 {
        let before = self.score;
        self.score = if delta >= 0 {
            self.score.saturating_add(delta.unsigned_abs())
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };
        i64::try_from(self.score).unwrap_or(i64::MAX) - i64::try_from(before).unwrap_or(i64::MAX)
    }
}
