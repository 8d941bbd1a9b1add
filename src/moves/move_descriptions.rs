//! Packed move encoding.
//!
//! A move only records where a piece goes and what a pawn promotes to; capture,
//! castling and en-passant behaviour is inferred from the board when the move
//! is made.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const PROMOTION_SHIFT: u16 = 12;

const SQUARE_MASK: u16 = 0x3F;
const PROMOTION_MASK: u16 = 0x7;
const NO_PROMOTION_CODE: u16 = 0;

/// Origin, destination and optional promotion piece, packed into 16 bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move(((from as u16 & SQUARE_MASK) << FROM_SHIFT) | ((to as u16 & SQUARE_MASK) << TO_SHIFT))
    }

    /// A pawn move onto the last rank. Only knight, bishop, rook and queen
    /// are meaningful promotion pieces.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        let base = Move::new(from, to).0;
        Move(base | (promotion_code(promotion) << PROMOTION_SHIFT))
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match (self.0 >> PROMOTION_SHIFT) & PROMOTION_MASK {
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

const fn promotion_code(kind: PieceKind) -> u16 {
    match kind {
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::Pawn | PieceKind::King => NO_PROMOTION_CODE,
    }
}

/// Long algebraic form, e.g. `e2e4` or `a7a8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square_to_algebraic(self.from()),
            square_to_algebraic(self.to())
        )?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}
