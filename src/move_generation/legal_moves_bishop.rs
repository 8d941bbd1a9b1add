use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::generate_piece_moves;
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::Move;

pub fn generate_bishop_moves(tables: &AttackTables, game_state: &GameState, out: &mut Vec<Move>) {
    generate_piece_moves(
        tables,
        game_state,
        PieceKind::Bishop,
        AttackTables::bishop_attacks,
        out,
    );
}
