//! Canonical chess-rule constants.
//!
//! Holds the standard starting position and the fixed castling geometry used
//! by both the move generator and make/unmake.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub must_be_empty: u64,
    /// Squares the king stands on or crosses, which must not be attacked.
    pub must_be_safe: [Square; 3],
}

pub const WHITE_KINGSIDE: CastlingGeometry = CastlingGeometry {
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    must_be_empty: (1 << 5) | (1 << 6),
    must_be_safe: [4, 5, 6],
};

pub const WHITE_QUEENSIDE: CastlingGeometry = CastlingGeometry {
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
    must_be_safe: [4, 3, 2],
};

pub const BLACK_KINGSIDE: CastlingGeometry = CastlingGeometry {
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    must_be_empty: (1 << 61) | (1 << 62),
    must_be_safe: [60, 61, 62],
};

pub const BLACK_QUEENSIDE: CastlingGeometry = CastlingGeometry {
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
    must_be_safe: [60, 59, 58],
};

#[inline]
pub const fn kingside_castling(color: Color) -> &'static CastlingGeometry {
    match color {
        Color::White => &WHITE_KINGSIDE,
        Color::Black => &BLACK_KINGSIDE,
    }
}

#[inline]
pub const fn queenside_castling(color: Color) -> &'static CastlingGeometry {
    match color {
        Color::White => &WHITE_QUEENSIDE,
        Color::Black => &BLACK_QUEENSIDE,
    }
}

/// Rank a pawn of `color` starts on (and may double push from).
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Rank a pawn of `color` promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
