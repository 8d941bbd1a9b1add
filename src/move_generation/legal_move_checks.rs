use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::AttackTables;

#[inline]
pub fn is_king_in_check(tables: &AttackTables, game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(tables, game_state, king_sq, color.opposite())
}

/// Reverse lookup: a piece of `attacker_color` attacks `square` iff the same
/// piece standing on `square` would reach it.
pub fn is_square_attacked(
    tables: &AttackTables,
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> bool {
    // Pawn captures are mirrored, so look them up with the defender's color.
    let attacker_pawns = game_state.pieces_of(attacker_color, PieceKind::Pawn);
    if tables.pawn_captures(attacker_color.opposite(), square) & attacker_pawns != 0 {
        return true;
    }

    let attacker_knights = game_state.pieces_of(attacker_color, PieceKind::Knight);
    if tables.knight(square) & attacker_knights != 0 {
        return true;
    }

    let attacker_kings = game_state.pieces_of(attacker_color, PieceKind::King);
    if tables.king(square) & attacker_kings != 0 {
        return true;
    }

    let occupancy = game_state.occupancy_all();
    let queens = game_state.pieces_of(attacker_color, PieceKind::Queen);

    let bishops_queens = game_state.pieces_of(attacker_color, PieceKind::Bishop) | queens;
    if bishops_queens != 0 && tables.bishop_attacks(square, occupancy) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = game_state.pieces_of(attacker_color, PieceKind::Rook) | queens;
    if rooks_queens != 0 && tables.rook_attacks(square, occupancy) & rooks_queens != 0 {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        let tables = AttackTables::shared();
        // White pawn e4, black pawn d6.
        let game = position("4k3/8/3p4/8/4P3/8/8/4K3 w - - 0 1");

        assert!(is_square_attacked(tables, &game, 35, Color::White)); // d5
        assert!(is_square_attacked(tables, &game, 37, Color::White)); // f5
        assert!(!is_square_attacked(tables, &game, 28 - 8, Color::White));
        assert!(is_square_attacked(tables, &game, 36, Color::Black)); // e5 from d6
        assert!(is_square_attacked(tables, &game, 34, Color::Black)); // c5
        assert!(!is_square_attacked(tables, &game, 35, Color::Black));
    }

    #[test]
    fn sliders_are_stopped_by_blockers() {
        let tables = AttackTables::shared();
        // Black rook a8, white pawn a4, white king a1.
        let game = position("r3k3/8/8/8/P7/8/8/K7 w - - 0 1");

        assert!(is_square_attacked(tables, &game, 24, Color::Black));
        assert!(!is_square_attacked(tables, &game, 16, Color::Black));
        assert!(!is_king_in_check(tables, &game, Color::White));
    }

    #[test]
    fn detects_check_from_each_piece_kind() {
        let tables = AttackTables::shared();
        for fen in [
            "4k3/8/8/8/8/8/3p4/4K3 w - - 0 1",
            "4k3/8/8/8/8/5n2/8/4K3 w - - 0 1",
            "4k3/8/8/b7/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/r3K3 w - - 0 1",
            "4k3/8/8/8/4q3/8/8/4K3 w - - 0 1",
        ] {
            let game = position(fen);
            assert!(is_king_in_check(tables, &game, Color::White), "{fen}");
            assert!(!is_king_in_check(tables, &game, Color::Black), "{fen}");
        }
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let tables = AttackTables::shared();
        let game = position("8/8/8/8/8/8/8/q7 w - - 0 1");
        assert!(!is_king_in_check(tables, &game, Color::White));
    }
}
