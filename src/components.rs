#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::game::TILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileColor {
    Aqua,
    Blue,
    Green,
    Magenta,
    Orange,
    Red,
    Yellow,
    // Landing preview of the active tile, never stored in the grid
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileShape {
    // Markers used by the renderer for the well floor and background
    Base,
    Background,
    Bar,
    J,
    L,
    S,
    Square,
    T,
    Z,
}

type Footprint = [(i32, i32); TILE_SIZE];

// Offsets inside a 4x4 box, indexed by rotation (0 = spawn, clockwise order).
const BAR: [Footprint; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];
const J: [Footprint; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];
const L: [Footprint; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];
const S: [Footprint; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];
const SQUARE: Footprint = [(1, 0), (2, 0), (1, 1), (2, 1)];
const T: [Footprint; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];
const Z: [Footprint; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

impl TileShape {
    pub const PLAYABLE: [TileShape; 7] = [
        TileShape::Bar,
        TileShape::J,
        TileShape::L,
        TileShape::S,
        TileShape::Square,
        TileShape::T,
        TileShape::Z,
    ];

    #[must_use]
    pub fn is_playable(self) -> bool {
        !matches!(self, TileShape::Base | TileShape::Background)
    }

    /// Cells occupied by the shape at `rotation`, relative to the tile origin.
    /// Marker shapes occupy nothing.
    #[must_use]
    pub fn footprint(self, rotation: Rotation) -> &'static [(i32, i32)] {
        let r = rotation.index();
        match self {
            TileShape::Base | TileShape::Background => &[],
            TileShape::Bar => &BAR[r],
            TileShape::J => &J[r],
            TileShape::L => &L[r],
            TileShape::S => &S[r],
            TileShape::Square => &SQUARE,
            TileShape::T => &T[r],
            TileShape::Z => &Z[r],
        }
    }

    /// Number of distinct orientations the shape can reach.
    #[must_use]
    pub fn orientations(self) -> u8 {
        match self {
            TileShape::Base | TileShape::Background | TileShape::Square => 1,
            _ => 4,
        }
    }

    #[must_use]
    pub fn default_color(self) -> TileColor {
        match self {
            TileShape::Bar => TileColor::Aqua,
            TileShape::J => TileColor::Blue,
            TileShape::L => TileColor::Orange,
            TileShape::S => TileColor::Green,
            TileShape::Square | TileShape::Base | TileShape::Background => TileColor::Yellow,
            TileShape::T => TileColor::Magenta,
            TileShape::Z => TileColor::Red,
        }
    }
}

/// Orientation index, 0..4 in clockwise order starting at the spawn state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    pub const SPAWN: Rotation = Rotation(0);

    #[must_use]
    pub fn new(index: u8) -> Self {
        Self(index % 4)
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn clockwise(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub fn counter_clockwise(self) -> Self {
        Self((self.0 + 3) % 4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Opaque handle owned by the rendering side. The engine only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub color: TileColor,
    pub shape: TileShape,
    pub rotation: Rotation,
    pub position: Position,
    pub texture: Option<TextureHandle>,
}

impl Tile {
    #[must_use]
    pub fn new(shape: TileShape) -> Self {
        Self {
            color: shape.default_color(),
            shape,
            rotation: Rotation::SPAWN,
            position: Position::default(),
            texture: None,
        }
    }

    /// Absolute grid cells covered by the tile.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .footprint(self.rotation)
            .iter()
            .map(|&(dx, dy)| (self.position.x + dx, self.position.y + dy))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} r{} at ({}, {})",
            self.shape,
            self.color,
            self.rotation.index(),
            self.position.x,
            self.position.y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Option<TileColor>>>,
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; height]; width],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> EngineResult<Option<TileColor>> {
        if self.in_bounds(x, y) {
            Ok(self.cells[x as usize][y as usize])
        } else {
            Err(EngineError::OutOfRange { x, y })
        }
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Option<TileColor>) -> EngineResult<()> {
        if self.in_bounds(x, y) {
            self.cells[x as usize][y as usize] = cell;
            Ok(())
        } else {
            Err(EngineError::OutOfRange { x, y })
        }
    }

    pub fn clear(&mut self) {
        for column in &mut self.cells {
            column.fill(None);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|column| column.iter().all(Option::is_none))
    }

    #[must_use]
    pub fn can_place(&self, shape: TileShape, rotation: Rotation, position: Position) -> bool {
        let footprint = shape.footprint(rotation);
        !footprint.is_empty()
            && footprint.iter().all(|&(dx, dy)| {
                let (x, y) = (position.x + dx, position.y + dy);
                self.in_bounds(x, y) && self.cells[x as usize][y as usize].is_none()
            })
    }

    #[must_use]
    pub fn can_place_tile(&self, tile: &Tile) -> bool {
        self.can_place(tile.shape, tile.rotation, tile.position)
    }

    pub fn lock(&mut self, tile: &Tile) {
        for (x, y) in tile.blocks() {
            if self.in_bounds(x, y) {
                self.cells[x as usize][y as usize] = Some(tile.color);
            }
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        (0..self.width).all(|x| self.cells[x][y].is_some())
    }

    /// Removes every full row and returns their indices in ascending order.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let cleared: Vec<usize> = (0..self.height).filter(|&y| self.is_row_full(y)).collect();
        if cleared.is_empty() {
            return cleared;
        }

        // Compact surviving rows towards the bottom, then blank the top.
        for column in &mut self.cells {
            let mut write_y = self.height;
            for read_y in (0..self.height).rev() {
                if cleared.binary_search(&read_y).is_ok() {
                    continue;
                }
                write_y -= 1;
                column[write_y] = column[read_y];
            }
            column[..write_y].fill(None);
        }

        cleared
    }

    /// Row-major copy of the cells, `rows[y][x]`.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Option<TileColor>>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.cells[x][y]).collect())
            .collect()
    }
}
