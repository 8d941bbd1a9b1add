//! Make/unmake for `GameState`.
//!
//! Moves carry no flags, so capture, en-passant, castling and promotion are
//! inferred from the board at the time the move is made. `make_move` returns an
//! `UndoState` holding exactly what it overwrote; `unmake_move` consumes it.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{kingside_castling, queenside_castling};
use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};
use crate::moves::move_descriptions::Move;

impl GameState {
    /// Applies `mv`, which must have been generated for this exact position.
    ///
    /// There is no legality re-check. The origin must hold a piece of the side
    /// to move; anything else is a caller bug. Debug builds assert on it, and
    /// release builds leave the board untouched so the token still unwinds.
    pub fn make_move(&mut self, mv: Move) -> UndoState {
        let from = mv.from();
        let to = mv.to();
        let us = self.side_to_move;
        let them = us.opposite();
        debug_assert_eq!(
            self.color_on(from),
            Some(us),
            "{mv} does not start on a {us:?} piece"
        );
        let moved_piece = self
            .kind_on(from)
            .filter(|_| self.color_on(from) == Some(us));

        let mut undo = UndoState {
            mv,
            moved_piece,
            captured: None,
            castling_rook: None,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            ply: self.ply.wrapping_add(1),
        };

        self.en_passant_square = None;

        match moved_piece {
            Some(kind) => {
                undo.captured = self.captured_by(kind, from, to, undo.prev_en_passant_square);
                if let Some((captured_kind, captured_sq)) = undo.captured {
                    self.remove_piece(them, captured_kind, captured_sq);
                }

                let placed = match (kind, mv.promotion()) {
                    (PieceKind::Pawn, Some(promotion)) => promotion,
                    _ => kind,
                };
                self.remove_piece(us, kind, from);
                self.add_piece(us, placed, to);

                if kind == PieceKind::King && square_file(from).abs_diff(square_file(to)) == 2 {
                    let geometry = if to > from {
                        kingside_castling(us)
                    } else {
                        queenside_castling(us)
                    };
                    self.move_piece(us, PieceKind::Rook, geometry.rook_from, geometry.rook_to);
                    undo.castling_rook = Some((geometry.rook_from, geometry.rook_to));
                }

                if kind == PieceKind::King {
                    self.castling_rights.clear_color(us);
                }
                self.castling_rights.clear_rook_square(from);
                self.castling_rights.clear_rook_square(to);

                if kind == PieceKind::Pawn && from.abs_diff(to) == 16 {
                    self.en_passant_square = Some((from + to) / 2);
                }

                if kind == PieceKind::Pawn || undo.captured.is_some() {
                    self.halfmove_clock = 0;
                } else {
                    self.halfmove_clock = self.halfmove_clock.saturating_add(1);
                }
            }
            None => {
                self.halfmove_clock = self.halfmove_clock.saturating_add(1);
            }
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = them;
        self.ply = undo.ply;

        undo
    }

    /// Reverts the most recent `make_move`.
    ///
    /// Tokens must be returned in reverse order of issue. A token that does not
    /// belong to the latest make is rejected and the position is left as is.
    pub fn unmake_move(&mut self, undo: UndoState) -> ChessResult<()> {
        if undo.ply != self.ply {
            return Err(ChessError::UnmakeDiscipline {
                token_ply: undo.ply,
                position_ply: self.ply,
            });
        }

        let us = self.side_to_move.opposite();
        let from = undo.mv.from();
        let to = undo.mv.to();

        if let Some(kind) = undo.moved_piece {
            let placed = match (kind, undo.mv.promotion()) {
                (PieceKind::Pawn, Some(promotion)) => promotion,
                _ => kind,
            };
            self.remove_piece(us, placed, to);
            self.add_piece(us, kind, from);

            if let Some((rook_from, rook_to)) = undo.castling_rook {
                self.move_piece(us, PieceKind::Rook, rook_to, rook_from);
            }
            if let Some((captured_kind, captured_sq)) = undo.captured {
                self.add_piece(us.opposite(), captured_kind, captured_sq);
            }
        }

        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.side_to_move = us;
        self.ply = self.ply.wrapping_sub(1);

        Ok(())
    }

    /// Piece removed by moving `kind` from `from` to `to`, with the square it
    /// stood on. En passant takes the pawn behind the destination.
    fn captured_by(
        &self,
        kind: PieceKind,
        from: Square,
        to: Square,
        en_passant_square: Option<Square>,
    ) -> Option<(PieceKind, Square)> {
        let them = self.side_to_move.opposite();
        if self.occupancy(them) & square_bit(to) != 0 {
            return self.kind_on(to).map(|captured| (captured, to));
        }

        if kind != PieceKind::Pawn
            || en_passant_square != Some(to)
            || square_file(from) == square_file(to)
        {
            return None;
        }

        let behind = match self.side_to_move {
            Color::White => to.checked_sub(8)?,
            Color::Black => to.checked_add(8).filter(|sq| *sq < 64)?,
        };
        if self.pieces_of(them, PieceKind::Pawn) & square_bit(behind) != 0 {
            Some((PieceKind::Pawn, behind))
        } else {
            None
        }
    }
}

/// Copy-make: the position after `mv`, leaving `game_state` untouched.
#[inline]
pub fn apply_move(game_state: &GameState, mv: Move) -> GameState {
    let mut next = *game_state;
    next.make_move(mv);
    next
}

#[cfg(test)]
mod tests {
    use super::apply_move;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::moves::move_descriptions::Move;
    use crate::utils::algebraic::algebraic_to_square;

    fn mv(text: &str) -> Move {
        let from = algebraic_to_square(&text[0..2]).expect("valid origin");
        let to = algebraic_to_square(&text[2..4]).expect("valid destination");
        match text.chars().nth(4).and_then(PieceKind::from_fen_char) {
            Some(kind) => Move::with_promotion(from, to, kind),
            None => Move::new(from, to),
        }
    }

    fn position(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn double_push_sets_en_passant_square_and_next_move_clears_it() {
        let mut game = GameState::new_game();

        let first = game.make_move(mv("e2e4"));
        assert_eq!(game.en_passant_square(), algebraic_to_square("e3").ok());
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.fullmove_number(), 1);

        let second = game.make_move(mv("g8f6"));
        assert_eq!(game.en_passant_square(), None);
        assert_eq!(game.halfmove_clock(), 1);
        assert_eq!(game.fullmove_number(), 2);

        game.unmake_move(second).expect("LIFO unmake");
        game.unmake_move(first).expect("LIFO unmake");
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn en_passant_capture_removes_pawn_behind_destination() {
        let before = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let mut game = before;

        let undo = game.make_move(mv("e5f6"));
        assert_eq!(undo.captured_piece(), Some(PieceKind::Pawn));
        assert_eq!(game.piece_on(37), None);
        assert_eq!(game.piece_on(45), Some((Color::White, PieceKind::Pawn)));
        assert_eq!(game.halfmove_clock(), 0);
        assert!(game.is_consistent());

        game.unmake_move(undo).expect("LIFO unmake");
        assert_eq!(game, before);
    }

    #[test]
    fn castling_moves_rook_and_drops_both_rights() {
        let before = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10");
        let mut game = before;

        let undo = game.make_move(mv("e1g1"));
        assert!(undo.is_castling());
        assert_eq!(game.piece_on(5), Some((Color::White, PieceKind::Rook)));
        assert_eq!(game.piece_on(7), None);
        assert!(!game.castling_rights().white_kingside);
        assert!(!game.castling_rights().white_queenside);
        assert!(game.castling_rights().black_queenside);
        assert_eq!(game.halfmove_clock(), 4);

        game.unmake_move(undo).expect("LIFO unmake");
        assert_eq!(game, before);

        let after_queenside = apply_move(&position("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), mv("e8c8"));
        assert_eq!(after_queenside.piece_on(59), Some((Color::Black, PieceKind::Rook)));
        assert_eq!(after_queenside.piece_on(58), Some((Color::Black, PieceKind::King)));
        assert_eq!(after_queenside.fullmove_number(), 2);
    }

    #[test]
    fn capturing_a_home_rook_drops_that_right() {
        let game = apply_move(
            &position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"),
            mv("a1a8"),
        );
        assert!(!game.castling_rights().white_queenside);
        assert!(!game.castling_rights().black_queenside);
        assert!(game.castling_rights().white_kingside);
        assert!(game.castling_rights().black_kingside);
    }

    #[test]
    fn promotion_capture_round_trips() {
        let before = position("1r5k/P7/8/8/8/8/8/K7 w - - 5 40");
        let mut game = before;

        let undo = game.make_move(mv("a7b8n"));
        assert_eq!(game.piece_on(57), Some((Color::White, PieceKind::Knight)));
        assert_eq!(game.pieces(PieceKind::Pawn), 0);
        assert_eq!(game.pieces(PieceKind::Rook), 0);

        game.unmake_move(undo).expect("LIFO unmake");
        assert_eq!(game, before);
    }

    #[test]
    fn out_of_order_unmake_is_rejected_without_side_effects() {
        let mut game = GameState::new_game();
        let first = game.make_move(mv("d2d4"));
        let second = game.make_move(mv("d7d5"));
        let snapshot = game;

        let err = game.unmake_move(first).expect_err("stale token must be rejected");
        assert!(matches!(
            err,
            ChessError::UnmakeDiscipline {
                token_ply: 1,
                position_ply: 2
            }
        ));
        assert_eq!(game, snapshot);

        game.unmake_move(second).expect("latest token is still valid");
    }

    #[test]
    fn non_pawn_onto_en_passant_square_captures_nothing() {
        let before = position("4k3/8/8/3pP3/4N3/8/8/4K3 w - d6 0 1");
        let mut game = before;

        let undo = game.make_move(mv("e4d6"));
        assert_eq!(undo.captured_piece(), None);
        assert_eq!(game.piece_on(35), Some((Color::Black, PieceKind::Pawn)));
        assert_eq!(game.piece_on(43), Some((Color::White, PieceKind::Knight)));
        assert_eq!(game.en_passant_square(), None);
        assert_eq!(game.halfmove_clock(), 1);

        game.unmake_move(undo).expect("LIFO unmake");
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_lapses_after_an_unrelated_move() {
        let generator = LegalMoveGenerator::default();
        let mut game = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert!(generator.generate_legal_moves(&game).contains(&mv("e5d6")));

        game.make_move(mv("e1e2"));
        assert_eq!(game.en_passant_square(), None);
        game.make_move(mv("e8f8"));

        let moves = generator.generate_legal_moves(&game);
        assert!(!moves.contains(&mv("e5d6")));
        assert!(moves.contains(&mv("e5e6")));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "does not start on a White piece")]
    fn moving_an_enemy_piece_is_a_caller_bug() {
        let mut game = GameState::new_game();
        game.make_move(mv("e7e5"));
    }
}
