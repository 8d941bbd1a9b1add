//! Core board state representation.
//!
//! `GameState` stores one bitboard per piece kind (shared by both colors),
//! one occupancy bitboard per color, and the auxiliary state a FEN carries:
//! side to move, castling rights, en-passant square and the two move clocks.
//! It is `Copy` so the move generator can trial moves on a scratch copy while
//! perft mutates a single live instance through make/unmake.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    // [piece_kind], both colors together.
    pub(crate) pieces: [Bitboard; 6],
    // [color]
    pub(crate) occupancy_by_color: [Bitboard; 2],

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    /// Square passed over by the last double push; rank 3 or rank 6 only.
    pub(crate) en_passant_square: Option<Square>,

    /// Plies since the last pawn move or capture.
    pub(crate) halfmove_clock: u16,
    /// Starts at 1, incremented after each black move.
    pub(crate) fullmove_number: u16,

    /// Number of live `make_move` calls; guards unmake ordering.
    pub(crate) ply: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [0; 6],
            occupancy_by_color: [0; 2],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            ply: 0,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    pub fn new_game() -> Self {
        // Constant input; the empty-board fallback is unreachable.
        parse_fen(STARTING_POSITION_FEN).unwrap_or_default()
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Unicode board diagram for debugging.
    pub fn render(&self) -> String {
        render_game_state(self)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// All pieces of `kind`, both colors.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Pieces of `kind` belonging to `color`.
    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()] & self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    pub fn kind_on(&self, square: Square) -> Option<PieceKind> {
        let mask = square_bit(square);
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| self.pieces[kind.index()] & mask != 0)
    }

    pub fn color_on(&self, square: Square) -> Option<Color> {
        let mask = square_bit(square);
        if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Some(Color::White)
        } else if self.occupancy_by_color[Color::Black.index()] & mask != 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        Some((self.color_on(square)?, self.kind_on(square)?))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    #[inline]
    pub(crate) fn add_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        let mask = square_bit(square);
        self.pieces[kind.index()] |= mask;
        self.occupancy_by_color[color.index()] |= mask;
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        let mask = !square_bit(square);
        self.pieces[kind.index()] &= mask;
        self.occupancy_by_color[color.index()] &= mask;
    }

    #[inline]
    pub(crate) fn move_piece(&mut self, color: Color, kind: PieceKind, from: Square, to: Square) {
        self.remove_piece(color, kind, from);
        self.add_piece(color, kind, to);
    }

    /// Checks the bitboard invariants: color sets are disjoint, piece sets are
    /// disjoint, and both partitions cover the same squares.
    pub fn is_consistent(&self) -> bool {
        let [white, black] = self.occupancy_by_color;
        if white & black != 0 {
            return false;
        }

        let mut union = 0u64;
        for bb in self.pieces {
            if union & bb != 0 {
                return false;
            }
            union |= bb;
        }

        if union != white | black {
            return false;
        }

        match self.en_passant_square {
            Some(sq) => self.has_en_passant_victim(sq),
            None => true,
        }
    }

    /// Whether `target` is a usable en-passant square for the side to move:
    /// on its capture rank, empty, with an enemy pawn directly behind it.
    pub(crate) fn has_en_passant_victim(&self, target: Square) -> bool {
        let them = self.side_to_move.opposite();
        let (capture_rank, behind) = match self.side_to_move {
            Color::White => (5, target.checked_sub(8)),
            Color::Black => (2, target.checked_add(8)),
        };
        if square_rank(target) != capture_rank || self.occupancy_all() & square_bit(target) != 0 {
            return false;
        }
        behind.is_some_and(|sq| self.pieces_of(them, PieceKind::Pawn) & square_bit(sq) != 0)
    }
}
