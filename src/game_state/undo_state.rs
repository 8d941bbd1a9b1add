use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Single undo record returned by `make_move` and consumed by `unmake_move`.
///
/// Not `Clone`: each token can be spent exactly once.
#[derive(Debug)]
pub struct UndoState {
    pub(crate) mv: Move,
    /// `None` only when the origin did not hold a piece of the mover.
    pub(crate) moved_piece: Option<PieceKind>,
    /// Captured piece and the square it stood on (differs from `mv.to()` for
    /// en passant).
    pub(crate) captured: Option<(PieceKind, Square)>,
    /// Rook relocation `(from, to)` when the move castled.
    pub(crate) castling_rook: Option<(Square, Square)>,

    pub(crate) prev_castling_rights: CastlingRights,
    pub(crate) prev_en_passant_square: Option<Square>,
    pub(crate) prev_halfmove_clock: u16,
    pub(crate) prev_fullmove_number: u16,

    /// Value of `GameState::ply` right after the paired make.
    pub(crate) ply: u32,
}

impl UndoState {
    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[inline]
    pub fn moved_piece(&self) -> Option<PieceKind> {
        self.moved_piece
    }

    #[inline]
    pub fn captured_piece(&self) -> Option<PieceKind> {
        self.captured.map(|(kind, _)| kind)
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.castling_rook.is_some()
    }
}
