use crate::game_state::chess_types::Bitboard;
use crate::moves::attack_tables::set_if_on_board;

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Knight jump targets for every origin square, clipped at the board edge.
pub(crate) fn generate_knight_table() -> [Bitboard; 64] {
    let mut table = [0u64; 64];

    for (sq, targets) in table.iter_mut().enumerate() {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;

        for (df, dr) in KNIGHT_JUMPS {
            set_if_on_board(targets, file + df, rank + dr);
        }
    }

    table
}
