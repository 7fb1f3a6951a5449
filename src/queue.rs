#![warn(clippy::all, clippy::pedantic)]

use std::collections::VecDeque;
use std::fmt;

use log::trace;

use crate::components::Tile;
use crate::error::{EngineError, EngineResult};

/// FIFO of tiles waiting to become active. The queue owns every tile it holds
/// until it is dequeued.
#[derive(Debug, Clone, Default)]
pub struct TileQueue {
    tiles: VecDeque<Tile>,
    // Maximum number of queued tiles the storage may hold, if bounded
    limit: Option<usize>,
}

impl TileQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue that refuses to grow past `limit` tiles, reporting
    /// `MemoryFailure` exactly as an exhausted allocator would.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            tiles: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn enqueue(&mut self, tile: Tile) -> EngineResult<()> {
        if self.limit.is_some_and(|limit| self.tiles.len() >= limit) {
            return Err(EngineError::MemoryFailure);
        }
        self.tiles.try_reserve(1)?;
        self.tiles.push_back(tile);
        trace!("Enqueued {tile}, queue size {}", self.tiles.len());
        Ok(())
    }

    pub fn dequeue(&mut self) -> EngineResult<Tile> {
        self.tiles.pop_front().ok_or(EngineError::Empty)
    }

    /// Drops every queued tile, keeping the queue usable.
    pub fn flush(&mut self) {
        self.tiles.clear();
    }

    /// Flushes and releases the queue.
    pub fn destroy(mut self) {
        self.flush();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn front(&self) -> Option<&Tile> {
        self.tiles.front()
    }

    #[must_use]
    pub fn back(&self) -> Option<&Tile> {
        self.tiles.back()
    }

    /// Head-to-tail traversal, never longer than `len()`.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().take(self.tiles.len())
    }
}

impl fmt::Display for TileQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Queue is empty");
        }
        writeln!(f, "Queue size: {}", self.len())?;
        for tile in self.iter() {
            writeln!(f, "{tile}")?;
        }
        Ok(())
    }
}
