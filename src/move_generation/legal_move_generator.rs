//! Full legal move generation pipeline.
//!
//! Runs piece-wise pseudo-legal generation in a fixed order (pawn, knight,
//! bishop, rook, queen, king; origins ascending), then drops every move that
//! leaves the mover's king attacked, tested on a scratch copy of the position.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::Move;

#[derive(Clone, Copy)]
pub struct LegalMoveGenerator<'a> {
    tables: &'a AttackTables,
}

impl Default for LegalMoveGenerator<'static> {
    fn default() -> Self {
        Self::new(AttackTables::shared())
    }
}

impl<'a> LegalMoveGenerator<'a> {
    pub fn new(tables: &'a AttackTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a AttackTables {
        self.tables
    }

    /// Moves that obey piece movement and occupancy, before the self-check
    /// filter. Castling is already fully checked here.
    pub fn generate_pseudo_legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        let mut pseudo = Vec::<Move>::with_capacity(128);

        generate_pawn_moves(self.tables, game_state, &mut pseudo);
        generate_knight_moves(self.tables, game_state, &mut pseudo);
        generate_bishop_moves(self.tables, game_state, &mut pseudo);
        generate_rook_moves(self.tables, game_state, &mut pseudo);
        generate_queen_moves(self.tables, game_state, &mut pseudo);
        generate_king_moves(self.tables, game_state, &mut pseudo);

        pseudo
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self, game_state: &GameState) -> bool {
        is_king_in_check(self.tables, game_state, game_state.side_to_move())
    }
}

impl MoveGenerator for LegalMoveGenerator<'_> {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        let mover = game_state.side_to_move();
        let mut legal = self.generate_pseudo_legal_moves(game_state);

        // Illegal if own king is attacked after the move.
        legal.retain(|&mv| !is_king_in_check(self.tables, &apply_move(game_state, mv), mover));
        legal
    }
}
