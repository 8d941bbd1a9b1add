//! FEN-to-GameState parser.
//!
//! Fields are whitespace separated (runs of whitespace collapse) and consumed
//! left to right: placement, active color, castling, en passant, halfmove
//! clock, fullmove number. Anything after the sixth field is ignored.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = next_field(&mut parts, "piece placement", fen)?;
    let side_part = next_field(&mut parts, "active color", fen)?;
    let castling_part = next_field(&mut parts, "castling rights", fen)?;
    let en_passant_part = next_field(&mut parts, "en-passant square", fen)?;
    let halfmove_part = next_field(&mut parts, "halfmove clock", fen)?;
    let fullmove_part = next_field(&mut parts, "fullmove number", fen)?;

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, &game_state)?;
    game_state.halfmove_clock = halfmove_part.parse::<u16>().map_err(|_| {
        ChessError::description(format!("invalid halfmove clock '{halfmove_part}'"))
    })?;
    // Several published perft suites write a fullmove number of 0; it is read
    // as 1 so the counter stays positive.
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| {
            ChessError::description(format!("invalid fullmove number '{fullmove_part}'"))
        })?
        .max(1);

    Ok(game_state)
}

fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    name: &str,
    fen: &str,
) -> ChessResult<&'a str> {
    parts
        .next()
        .ok_or_else(|| ChessError::description(format!("missing {name} in '{fen}'")))
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::description(format!(
            "piece placement '{board_part}' has {} ranks, expected 8",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = (7 - fen_rank_idx) as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::description(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    break;
                }
                continue;
            }

            let kind = PieceKind::from_fen_char(ch).ok_or_else(|| {
                ChessError::description(format!("invalid piece character '{ch}'"))
            })?;
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };

            if file >= 8 {
                file += 1;
                break;
            }

            game_state.add_piece(color, kind, board_rank * 8 + file);
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::description(format!(
                "rank '{rank_str}' does not account for exactly 8 squares"
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::description(format!(
            "invalid active color '{side_part}'"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => {
                return Err(ChessError::description(format!(
                    "invalid castling rights '{castling_part}'"
                )))
            }
        }
    }

    Ok(rights)
}

/// The target must sit behind an enemy pawn that could just have
/// double-stepped: rank 6 with white to move, rank 3 with black to move.
fn parse_en_passant_square(
    en_passant_part: &str,
    game_state: &GameState,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let mover = game_state.side_to_move();
    let expected_rank = match mover {
        Color::White => 5,
        Color::Black => 2,
    };
    if square_rank(square) != expected_rank {
        return Err(ChessError::description(format!(
            "en-passant square '{en_passant_part}' is not on rank {} with {mover:?} to move",
            expected_rank + 1
        )));
    }

    if !game_state.has_en_passant_victim(square) {
        return Err(ChessError::description(format!(
            "en-passant square '{en_passant_part}' has no double-stepped pawn behind it"
        )));
    }

    Ok(Some(square))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move(), Color::White);
        assert_eq!(game_state.castling_rights(), CastlingRights::ALL);
        assert_eq!(game_state.en_passant_square(), None);
        assert_eq!(game_state.halfmove_clock(), 0);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.occupancy_all().count_ones(), 32);
        assert!(game_state.is_consistent());
    }

    #[test]
    fn whitespace_between_fields_collapses() {
        let game_state = parse_fen("  8/8/8/8/8/8/8/K6k   b  -  -  12\t40 ")
            .expect("padded FEN should parse");
        assert_eq!(game_state.side_to_move(), Color::Black);
        assert_eq!(game_state.halfmove_clock(), 12);
        assert_eq!(game_state.fullmove_number(), 40);
    }

    #[test]
    fn fewer_than_six_fields_is_malformed() {
        let err = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0")
            .expect_err("five fields must fail");
        assert!(matches!(err, ChessError::MalformedDescription(_)));
        assert!(matches!(parse_fen(""), Err(ChessError::MalformedDescription(_))));
    }

    #[test]
    fn rank_square_counts_must_be_exact() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::MalformedDescription(_))),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn numeric_fields_must_be_integers() {
        assert!(parse_fen("8/8/8/8/8/8/8/K6k w - - x 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/K6k w - - -1 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/K6k w - - 0 one").is_err());
    }

    #[test]
    fn rejects_bad_symbolic_fields() {
        assert!(parse_fen("8/8/8/8/8/8/8/K6k x - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/K6k w KX - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/K6k w - e4 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/K6k w - z9 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/K5xk w - - 0 1").is_err());
    }

    #[test]
    fn en_passant_square_is_read() {
        let game_state =
            parse_fen("rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 2")
                .expect("FEN with en-passant square should parse");
        assert_eq!(game_state.en_passant_square(), Some(19));
    }

    #[test]
    fn zero_fullmove_number_is_read_as_one() {
        let game_state = parse_fen("8/8/8/8/8/8/8/K6k w - - 0 0").expect("FEN should parse");
        assert_eq!(game_state.fullmove_number(), 1);
    }

    #[test]
    fn en_passant_rank_must_match_side_to_move() {
        for fen in [
            "4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1",
            "4k3/8/8/8/3Pp3/8/8/4K3 w - d3 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::MalformedDescription(_))),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn en_passant_needs_enemy_pawn_behind_empty_target() {
        for fen in [
            "4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1",
            "4k3/8/8/4N3/8/8/8/4K3 w - e6 0 1",
            "4k3/8/8/4P3/8/8/8/4K3 w - e6 0 1",
            "4k3/8/4n3/4p3/8/8/8/4K3 w - e6 0 1",
            "4k3/8/8/8/4p3/8/8/4K3 b - e3 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::MalformedDescription(_))),
                "{fen} should be rejected"
            );
        }

        let game_state = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
            .expect("pawn behind the target should parse");
        assert_eq!(game_state.en_passant_square(), Some(43));
        assert!(game_state.is_consistent());
    }
}
