#![warn(clippy::all, clippy::pedantic)]

use crate::app::{GameSession, ProgramFlags};
use crate::components::{Tile, TileColor};
use crate::error::EngineResult;
use crate::systems::ghost_of;

/// Everything a frame needs, copied out of the session under the read lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    // Row-major, `cells[y][x]`
    pub cells: Vec<Vec<Option<TileColor>>>,
    pub active: Option<Tile>,
    pub ghost: Option<Tile>,
    pub held: Option<Tile>,
    pub preview: Vec<Tile>,
    pub background: [u8; 3],
    pub flags: ProgramFlags,
    pub score: u64,
    pub combo: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl Snapshot {
    #[must_use]
    pub fn capture(session: &GameSession) -> Self {
        Self {
            width: session.grid.width(),
            height: session.grid.height(),
            cells: session.grid.rows(),
            active: session.current,
            ghost: ghost_of(session),
            held: session.held,
            preview: session
                .queue
                .iter()
                .take(session.settings.lookahead)
                .copied()
                .collect(),
            background: session.settings.background,
            flags: session.flags,
            score: session.state.score,
            combo: session.state.combo,
            level: session.state.level,
            lines: session.state.lines_cleared,
            game_over: session.game_over,
        }
    }

    /// Color shown at `(x, y)`: the active tile over its ghost over the grid.
    #[must_use]
    pub fn color_at(&self, x: usize, y: usize) -> Option<TileColor> {
        let covers = |tile: &Option<Tile>| {
            tile.as_ref().is_some_and(|t| {
                t.blocks()
                    .any(|(bx, by)| usize::try_from(bx) == Ok(x) && usize::try_from(by) == Ok(y))
            })
        };
        if covers(&self.active) {
            return self.active.map(|t| t.color);
        }
        if let Some(cell) = self.cells.get(y).and_then(|row| row.get(x)).copied().flatten() {
            return Some(cell);
        }
        if covers(&self.ghost) {
            return Some(TileColor::Ghost);
        }
        None
    }
}

/// Draws frames. Runs on the render thread and never touches gameplay state.
pub trait Renderer: Send {
    fn draw(&mut self, frame: &Snapshot) -> EngineResult<()>;
}
