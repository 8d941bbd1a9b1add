//! Pawn geometry tables, one set per color.

use crate::game_state::chess_rules::pawn_start_rank;
use crate::game_state::chess_types::{Bitboard, Color};
use crate::moves::attack_tables::set_if_on_board;

pub(crate) struct PawnTables {
    /// [color][square]
    pub push: [[Bitboard; 64]; 2],
    pub double_push: [[Bitboard; 64]; 2],
    pub captures: [[Bitboard; 64]; 2],
    /// Origin squares from which a double push is allowed (ranks 2 and 7).
    pub double_push_eligible: [Bitboard; 64],
}

pub(crate) fn generate_pawn_tables() -> PawnTables {
    let mut tables = PawnTables {
        push: [[0; 64]; 2],
        double_push: [[0; 64]; 2],
        captures: [[0; 64]; 2],
        double_push_eligible: [0; 64],
    };

    for sq in 0..64usize {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;

        for color in [Color::White, Color::Black] {
            let c = color.index();
            let forward = match color {
                Color::White => 1,
                Color::Black => -1,
            };

            set_if_on_board(&mut tables.push[c][sq], file, rank + forward);
            set_if_on_board(&mut tables.captures[c][sq], file - 1, rank + forward);
            set_if_on_board(&mut tables.captures[c][sq], file + 1, rank + forward);

            if rank == pawn_start_rank(color) as i32 {
                set_if_on_board(&mut tables.double_push[c][sq], file, rank + 2 * forward);
                set_if_on_board(&mut tables.double_push_eligible[sq], file, rank);
            }
        }
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_tables;
    use crate::game_state::chess_types::Color;

    #[test]
    fn white_and_black_pawns_move_in_opposite_directions() {
        let tables = generate_pawn_tables();
        let (w, b) = (Color::White.index(), Color::Black.index());

        // e2
        assert_eq!(tables.push[w][12], 1u64 << 20);
        assert_eq!(tables.double_push[w][12], 1u64 << 28);
        assert_eq!(tables.captures[w][12], (1u64 << 19) | (1u64 << 21));

        // e7
        assert_eq!(tables.push[b][52], 1u64 << 44);
        assert_eq!(tables.double_push[b][52], 1u64 << 36);
        assert_eq!(tables.captures[b][52], (1u64 << 43) | (1u64 << 45));
    }

    #[test]
    fn double_push_only_from_start_rank() {
        let tables = generate_pawn_tables();
        let w = Color::White.index();

        assert_eq!(tables.double_push[w][20], 0);
        assert_eq!(tables.double_push_eligible[8], 1u64 << 8);
        assert_eq!(tables.double_push_eligible[55], 1u64 << 55);
        assert_eq!(tables.double_push_eligible[20], 0);
    }

    #[test]
    fn edge_file_captures_are_clipped() {
        let tables = generate_pawn_tables();
        let w = Color::White.index();
        let b = Color::Black.index();

        assert_eq!(tables.captures[w][8], 1u64 << 17); // a2 -> b3 only
        assert_eq!(tables.captures[b][55], 1u64 << 46); // h7 -> g6 only
        assert_eq!(tables.push[w][60], 0); // nothing beyond rank 8
    }
}
