#![warn(clippy::all, clippy::pedantic)]

use crate::components::{Tile, TileShape};

/// Source of new pieces used to keep the tile queue topped up.
pub trait TileGenerator: Send + Sync {
    fn next_tile(&mut self) -> Tile;
}

/// Uniformly random pieces.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: fastrand::Rng,
}

impl RandomGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGenerator for RandomGenerator {
    fn next_tile(&mut self) -> Tile {
        let shape = TileShape::PLAYABLE[self.rng.usize(..TileShape::PLAYABLE.len())];
        Tile::new(shape)
    }
}

/// Repeats a fixed sequence of shapes. Handy for scripted sessions.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    shapes: Vec<TileShape>,
    next: usize,
}

impl SequenceGenerator {
    /// # Panics
    /// Panics if `shapes` is empty.
    #[must_use]
    pub fn new(shapes: Vec<TileShape>) -> Self {
        assert!(!shapes.is_empty(), "sequence needs at least one shape");
        Self { shapes, next: 0 }
    }
}

impl TileGenerator for SequenceGenerator {
    fn next_tile(&mut self) -> Tile {
        let shape = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        Tile::new(shape)
    }
}
