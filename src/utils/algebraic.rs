//! Square conversions for coordinate notation (`e4` <-> 28).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{square_file, square_rank, Square};

/// Convert coordinate notation (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::description(format!(
            "invalid square '{square}'"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::description(format!(
            "invalid file '{}' in square '{square}'",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::description(format!(
            "invalid rank '{}' in square '{square}'",
            rank as char
        )));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to coordinate notation.
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64, "square index out of range: {square}");
    let file_char = char::from(b'a' + square_file(square));
    let rank_char = char::from(b'1' + square_rank(square) % 8);
    format!("{file_char}{rank_char}")
}
