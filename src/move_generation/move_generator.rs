use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

/// Produces the legal moves for the side to move. An empty list means
/// checkmate or stalemate; there are no error cases.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move>;
}
