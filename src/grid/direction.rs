//! The eight search directions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit vector and display name for one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionVector {
    pub d_row: isize,
    pub d_col: isize,
    pub name: &'static str,
}

/// Direction table, indexed by `Direction as usize`
pub static DIRECTION_VECTORS: [DirectionVector; 8] = [
    DirectionVector { d_row: -1, d_col: 0, name: "UP" },
    DirectionVector { d_row: 1, d_col: 0, name: "DOWN" },
    DirectionVector { d_row: 0, d_col: -1, name: "LEFT" },
    DirectionVector { d_row: 0, d_col: 1, name: "RIGHT" },
    DirectionVector { d_row: -1, d_col: -1, name: "UP_LEFT" },
    DirectionVector { d_row: -1, d_col: 1, name: "UP_RIGHT" },
    DirectionVector { d_row: 1, d_col: -1, name: "DOWN_LEFT" },
    DirectionVector { d_row: 1, d_col: 1, name: "DOWN_RIGHT" },
];

/// Search direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    UpLeft = 4,
    UpRight = 5,
    DownLeft = 6,
    DownRight = 7,
}

impl Direction {
    /// All directions in table order (the order matches are reported in)
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    #[inline]
    pub fn vector(self) -> &'static DirectionVector {
        &DIRECTION_VECTORS[self as usize]
    }

    /// (Δrow, Δcol)
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        let v = self.vector();
        (v.d_row, v.d_col)
    }

    pub fn name(self) -> &'static str {
        self.vector().name
    }

    /// The direction pointing the other way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
