pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_FALL_SPEED_MS, DEFAULT_FPS, DEFAULT_LOGIC_TICK_MS,
    DEFAULT_SPEED_MULTIPLIER, MAX_FALL_SPEED_MS, MAX_GRID_SIZE, MAX_LOOKAHEAD,
    MAX_SPEED_MULTIPLIER, MAX_VOLUME, POINTS_COMBO_MULTIPLIER, SOUNDTRACKS_AMOUNT,
    TILE_QUEUED_AMOUNT,
};
use crate::input::Keymap;
use loader::ConfigError;

// Smallest well a four-cell piece can spawn and rotate in
const MIN_GRID_SIZE: usize = 4;

/// Everything read at startup. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub timing: TimingConfig,
    pub gameplay: GameplayConfig,
    pub audio: AudioConfig,
    pub window: WindowConfig,
    pub keymap: Keymap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub base_fall_speed_ms: u64,
    pub speed_multiplier: u32,
    pub fps: u32,
    pub logic_tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_fall_speed_ms: DEFAULT_FALL_SPEED_MS,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            fps: DEFAULT_FPS,
            logic_tick_ms: DEFAULT_LOGIC_TICK_MS,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    #[must_use]
    pub fn logic_tick(&self) -> Duration {
        Duration::from_millis(self.logic_tick_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub lookahead: usize,
    pub combo_bonus: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            lookahead: TILE_QUEUED_AMOUNT,
            combo_bonus: POINTS_COMBO_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub soundtrack: u8,
    pub soundtrack_volume: u8,
    pub effects_volume: u8,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            soundtrack: 0,
            soundtrack_volume: MAX_VOLUME / 2,
            effects_volume: MAX_VOLUME / 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    // > 0 scales up, < 0 scales down
    pub scaling_factor: i16,
    pub background: [u8; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            scaling_factor: 0,
            background: [16, 16, 24],
        }
    }
}

impl Config {
    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.grid.width < MIN_GRID_SIZE || self.grid.height < MIN_GRID_SIZE {
            return invalid(format!(
                "grid must be at least {MIN_GRID_SIZE}x{MIN_GRID_SIZE}, got {}x{}",
                self.grid.width, self.grid.height
            ));
        }
        if self.grid.width > MAX_GRID_SIZE || self.grid.height > MAX_GRID_SIZE {
            return invalid(format!(
                "grid must be at most {MAX_GRID_SIZE}x{MAX_GRID_SIZE}, got {}x{}",
                self.grid.width, self.grid.height
            ));
        }
        if !(1..=MAX_FALL_SPEED_MS).contains(&self.timing.base_fall_speed_ms) {
            return invalid(format!(
                "base_fall_speed_ms must be in 1..={MAX_FALL_SPEED_MS}, got {}",
                self.timing.base_fall_speed_ms
            ));
        }
        if !(1..=MAX_SPEED_MULTIPLIER).contains(&self.timing.speed_multiplier) {
            return invalid(format!(
                "speed_multiplier must be in 1..={MAX_SPEED_MULTIPLIER}, got {}",
                self.timing.speed_multiplier
            ));
        }
        if self.gameplay.lookahead > MAX_LOOKAHEAD {
            return invalid(format!(
                "lookahead must not exceed {MAX_LOOKAHEAD}, got {}",
                self.gameplay.lookahead
            ));
        }
        if self.timing.fps == 0 || self.timing.logic_tick_ms == 0 {
            return invalid("fps and logic_tick_ms must be positive".into());
        }
        if self.audio.soundtrack >= SOUNDTRACKS_AMOUNT {
            return invalid(format!(
                "soundtrack {} out of range 0..{SOUNDTRACKS_AMOUNT}",
                self.audio.soundtrack
            ));
        }
        if self.audio.soundtrack_volume > MAX_VOLUME || self.audio.effects_volume > MAX_VOLUME {
            return invalid(format!("volumes must not exceed {MAX_VOLUME}"));
        }
        self.keymap.validate()
    }
}
