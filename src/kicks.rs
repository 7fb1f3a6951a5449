//! Rotation kick offsets.
//!
//! Offsets are tried in order after a rotation. The tables follow SRS with y
//! pointing down, so the unkicked position comes first; the caller still falls
//! back to the zero offset for shapes whose table is empty.

#![warn(clippy::all, clippy::pedantic)]

use crate::components::{Rotation, TileShape};

type Kicks = [(i32, i32); 5];

// Indexed by `transition_index`.
const JLSTZ_KICKS: [Kicks; 8] = [
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // 0 -> 1
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],   // 1 -> 0
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],   // 1 -> 2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // 2 -> 1
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],    // 2 -> 3
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // 3 -> 2
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // 3 -> 0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],    // 0 -> 3
];

const BAR_KICKS: [Kicks; 8] = [
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)], // 0 -> 1
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)], // 1 -> 0
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)], // 1 -> 2
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)], // 2 -> 1
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)], // 2 -> 3
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)], // 3 -> 2
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)], // 3 -> 0
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)], // 0 -> 3
];

fn transition_index(from: Rotation, to: Rotation) -> Option<usize> {
    match (from.index(), to.index()) {
        (0, 1) => Some(0),
        (1, 0) => Some(1),
        (1, 2) => Some(2),
        (2, 1) => Some(3),
        (2, 3) => Some(4),
        (3, 2) => Some(5),
        (3, 0) => Some(6),
        (0, 3) => Some(7),
        _ => None,
    }
}

/// Kick offsets for rotating `shape` from `from` to `to`. Shapes without
/// rotation states and non-adjacent transitions have none.
#[must_use]
pub fn kick_offsets(shape: TileShape, from: Rotation, to: Rotation) -> &'static [(i32, i32)] {
    let Some(index) = transition_index(from, to) else {
        return &[];
    };
    match shape {
        TileShape::Bar => &BAR_KICKS[index],
        TileShape::J | TileShape::L | TileShape::S | TileShape::T | TileShape::Z => {
            &JLSTZ_KICKS[index]
        }
        TileShape::Square | TileShape::Base | TileShape::Background => &[],
    }
}
