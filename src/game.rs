#![warn(clippy::all, clippy::pedantic)]

// Default board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
pub const MAX_GRID_SIZE: usize = 256;

// Game timing
pub const DEFAULT_FALL_SPEED_MS: u64 = 1000; // Gravity interval at level 1
pub const DEFAULT_SPEED_MULTIPLIER: u32 = 5; // Soft drop divides, hold-slowed multiplies
pub const MAX_FALL_SPEED_MS: u64 = 60_000;
pub const MAX_SPEED_MULTIPLIER: u32 = 100;
pub const MIN_FALL_INTERVAL_MS: u64 = 50;
pub const LEVEL_SPEEDUP: f64 = 0.85; // Each level falls 15% faster
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_LOGIC_TICK_MS: u64 = 5;
pub const CLOCK_RESOLUTION_US: u64 = 500;

// Piece queue
pub const TILE_QUEUED_AMOUNT: usize = 4; // Lookahead shown in the preview
pub const MAX_LOOKAHEAD: usize = 64;
pub const TILE_SIZE: usize = 4; // Every playable piece has four cells

// Scoring
pub const POINTS_SOFT_DROP: i64 = 1; // Per cell
pub const POINTS_HARD_DROP: i64 = 2; // Per cell
pub const POINTS_HOLD: i64 = -2;
pub const POINTS_COMBO_MULTIPLIER: u32 = 50; // Bonus per combo step
pub const POINTS_SINGLE: u32 = 100;
pub const POINTS_DOUBLE: u32 = 300;
pub const POINTS_TRIPLE: u32 = 500;
pub const POINTS_QUAD: u32 = 800;

// Level progression
pub const LINES_PER_LEVEL: u32 = 10;
pub const STARTING_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 30;

// Audio
pub const SOUNDTRACKS_AMOUNT: u8 = 3;
pub const SOUND_EFFECT_AMOUNT: usize = 9;
pub const MAX_VOLUME: u8 = 128;
