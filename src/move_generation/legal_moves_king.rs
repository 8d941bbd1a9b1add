use crate::game_state::chess_rules::{kingside_castling, queenside_castling};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_moves_to_targets;
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::Move;

pub fn generate_king_moves(tables: &AttackTables, game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move();
    let Some(from) = game_state.king_square(side) else {
        return;
    };

    push_moves_to_targets(from, tables.king(from) & !game_state.occupancy(side), out);
    generate_castling_moves(tables, game_state, from, out);
}

fn generate_castling_moves(
    tables: &AttackTables,
    game_state: &GameState,
    king_from: Square,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move();
    let enemy = side.opposite();
    let rights = game_state.castling_rights();
    let own_rooks = game_state.pieces_of(side, PieceKind::Rook);

    for (has_right, geometry) in [
        (rights.kingside(side), kingside_castling(side)),
        (rights.queenside(side), queenside_castling(side)),
    ] {
        if !has_right || king_from != geometry.king_from {
            continue;
        }
        if own_rooks & square_bit(geometry.rook_from) == 0 {
            continue;
        }
        if game_state.occupancy_all() & geometry.must_be_empty != 0 {
            continue;
        }
        // Covers castling out of, through and into check.
        if geometry
            .must_be_safe
            .iter()
            .any(|&sq| is_square_attacked(tables, game_state, sq, enemy))
        {
            continue;
        }
        out.push(Move::new(king_from, geometry.king_to));
    }
}
