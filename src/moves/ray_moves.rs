//! Unblocked sliding rays.
//!
//! Each table entry runs from the origin (exclusive) to the board edge. The
//! blocker-aware lookups in `AttackTables` cut these rays at occupancy.

use crate::game_state::chess_types::Bitboard;
use crate::moves::attack_tables::set_if_on_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

pub const STRAIGHT_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// (file step, rank step)
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// True when square indices grow along the ray, so the nearest blocker is
    /// the lowest set bit.
    #[inline]
    pub const fn is_ascending(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }
}

/// [direction][square]
pub(crate) fn generate_ray_tables() -> [[Bitboard; 64]; 8] {
    let mut rays = [[0u64; 64]; 8];

    for direction in ALL_DIRECTIONS {
        let (df, dr) = direction.step();

        for (sq, ray) in rays[direction.index()].iter_mut().enumerate() {
            let mut file = (sq % 8) as i32 + df;
            let mut rank = (sq / 8) as i32 + dr;

            while set_if_on_board(ray, file, rank) {
                file += df;
                rank += dr;
            }
        }
    }

    rays
}
