use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_pawn_moves_to_targets;
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::Move;

/// Pushes, double pushes, captures, en-passant captures and promotions for
/// the side to move.
pub fn generate_pawn_moves(tables: &AttackTables, game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move();
    let empty = !game_state.occupancy_all();
    let enemy_occ = game_state.occupancy(side.opposite());
    let en_passant = game_state.en_passant_square().map_or(0, square_bit);

    let mut pawns = game_state.pieces_of(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;

        let single = tables.pawn_push(side, from) & empty;
        if single != 0 {
            push_pawn_moves_to_targets(side, from, single, out);

            if tables.is_double_push_eligible(from) {
                let double = tables.pawn_double_push(side, from) & empty;
                push_pawn_moves_to_targets(side, from, double, out);
            }
        }

        let captures = tables.pawn_captures(side, from) & (enemy_occ | en_passant);
        push_pawn_moves_to_targets(side, from, captures, out);

        pawns &= pawns - 1;
    }
}
