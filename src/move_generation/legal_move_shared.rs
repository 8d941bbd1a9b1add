use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::Move;

pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// One move from `from` to every square in `targets`, ascending.
#[inline]
pub fn push_moves_to_targets(from: Square, mut targets: Bitboard, out: &mut Vec<Move>) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(Move::new(from, to));
        targets &= targets - 1;
    }
}

/// Pawn moves to `targets`; a landing on the last rank expands into the four
/// promotions.
#[inline]
pub fn push_pawn_moves_to_targets(
    side: Color,
    from: Square,
    mut targets: Bitboard,
    out: &mut Vec<Move>,
) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        if square_rank(to) == promotion_rank(side) {
            for promotion in PROMOTION_PIECES {
                out.push(Move::with_promotion(from, to, promotion));
            }
        } else {
            out.push(Move::new(from, to));
        }
        targets &= targets - 1;
    }
}

/// Generates moves for every `kind` piece of the side to move, using `attacks`
/// to look up reachable squares. Own-occupied destinations are dropped.
#[inline]
pub fn generate_piece_moves<F>(
    tables: &AttackTables,
    game_state: &GameState,
    kind: PieceKind,
    attacks: F,
    out: &mut Vec<Move>,
) where
    F: Fn(&AttackTables, Square, Bitboard) -> Bitboard,
{
    let side = game_state.side_to_move();
    let own_occ = game_state.occupancy(side);
    let occupancy = game_state.occupancy_all();

    let mut pieces = game_state.pieces_of(side, kind);
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        push_moves_to_targets(from, attacks(tables, from, occupancy) & !own_occ, out);
        pieces &= pieces - 1;
    }
}
