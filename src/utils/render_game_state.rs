//! Terminal-oriented Unicode board renderer.
//!
//! Debug aid only: used by `GameState::render` and debug-level perft logs.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

/// Render the board and auxiliary state to a string for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match game_state.piece_on(rank * 8 + file) {
                Some((color, kind)) => out.push(piece_to_unicode(color, kind)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");

    let side = match game_state.side_to_move() {
        Color::White => "white",
        Color::Black => "black",
    };
    let en_passant = game_state
        .en_passant_square()
        .map(square_to_algebraic)
        .unwrap_or_else(|| "[none]".to_owned());
    out.push_str(&format!("{side} to play\n"));
    out.push_str(&format!("en passant square: {en_passant}\n"));
    out.push_str(&format!(
        "halfmove clock: {}, fullmove number: {}",
        game_state.halfmove_clock(),
        game_state.fullmove_number()
    ));

    out
}

fn piece_to_unicode(color: Color, kind: PieceKind) -> char {
    match (color, kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;

    #[test]
    fn renders_starting_position() {
        let rendered = GameState::new_game().render();

        println!("\n{rendered}");

        assert!(rendered.contains("8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8"));
        assert!(rendered.contains("1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1"));
        assert!(rendered.contains("white to play"));
    }
}
