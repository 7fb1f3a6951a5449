#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow more than 3 bools in structs for game states where bools represent distinct flags
    clippy::struct_excessive_bools
)]

use std::time::Duration;

use crate::components::{Grid, Tile};
use crate::config::Config;
use crate::queue::TileQueue;
use crate::scoring::{GameState, ScoringRules, default_level_curve};
use crate::spawner::TileGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementSpeed {
    #[default]
    Normal,
    // Sped up
    SoftDrop,
    // Slowed down
    Hold,
}

/// Session-wide flags read by every loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramFlags {
    pub running: bool,
    pub playing: bool,
    pub paused: bool,
    pub speed: MovementSpeed,
    pub soundtrack: u8,
    pub soundtrack_now_playing: Option<u8>,
}

impl Default for ProgramFlags {
    fn default() -> Self {
        Self {
            running: true,
            playing: false,
            paused: false,
            speed: MovementSpeed::Normal,
            soundtrack: 0,
            soundtrack_now_playing: None,
        }
    }
}

impl ProgramFlags {
    /// Gameplay state may only change while this holds.
    #[must_use]
    pub fn accepts_gameplay(&self) -> bool {
        self.running && self.playing && !self.paused
    }
}

/// Tunables fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub width: usize,
    pub height: usize,
    pub lookahead: usize,
    pub base_fall_speed: Duration,
    pub speed_multiplier: u32,
    pub background: [u8; 3],
    pub rules: ScoringRules,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            width: config.grid.width,
            height: config.grid.height,
            lookahead: config.gameplay.lookahead,
            base_fall_speed: Duration::from_millis(config.timing.base_fall_speed_ms),
            speed_multiplier: config.timing.speed_multiplier.max(1),
            background: config.window.background,
            rules: ScoringRules {
                combo_bonus: config.gameplay.combo_bonus,
                level_curve: default_level_curve,
            },
        }
    }
}

/// The one piece of shared gameplay state. Everything the logic loop mutates
/// lives here so a single lock covers it.
pub struct GameSession {
    pub grid: Grid,
    pub queue: TileQueue,
    pub current: Option<Tile>,
    pub held: Option<Tile>,
    pub can_hold: bool,
    pub state: GameState,
    pub flags: ProgramFlags,
    pub game_over: bool,
    pub drop_timer: Duration,
    pub settings: SessionSettings,
    pub(crate) generator: Box<dyn TileGenerator>,
}

impl GameSession {
    #[must_use]
    pub fn new(settings: SessionSettings, generator: Box<dyn TileGenerator>) -> Self {
        Self::with_queue(settings, generator, TileQueue::new())
    }

    /// Session using a caller-provided queue, e.g. one with a storage limit.
    #[must_use]
    pub fn with_queue(
        settings: SessionSettings,
        generator: Box<dyn TileGenerator>,
        queue: TileQueue,
    ) -> Self {
        Self {
            grid: Grid::new(settings.width, settings.height),
            queue,
            current: None,
            held: None,
            can_hold: true,
            state: GameState::default(),
            flags: ProgramFlags::default(),
            game_over: false,
            drop_timer: Duration::ZERO,
            settings,
            generator,
        }
    }

    /// Gravity interval for the current level and speed mode.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        let base = crate::systems::level_fall_interval(self.settings.base_fall_speed, self.state.level);
        match self.flags.speed {
            MovementSpeed::Normal => base,
            MovementSpeed::SoftDrop => base / self.settings.speed_multiplier,
            MovementSpeed::Hold => base
                .checked_mul(self.settings.speed_multiplier)
                .unwrap_or(Duration::MAX),
        }
    }
}
