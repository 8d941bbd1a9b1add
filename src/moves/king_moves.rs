use crate::game_state::chess_types::Bitboard;
use crate::moves::attack_tables::set_if_on_board;

/// One-step king targets for every origin square, clipped at the board edge.
pub(crate) fn generate_king_table() -> [Bitboard; 64] {
    let mut table = [0u64; 64];

    for (sq, targets) in table.iter_mut().enumerate() {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;

        for dr in -1..=1 {
            for df in -1..=1 {
                if df == 0 && dr == 0 {
                    continue;
                }
                set_if_on_board(targets, file + df, rank + dr);
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::generate_king_table;

    #[test]
    fn king_steps_are_clipped() {
        let table = generate_king_table();
        assert_eq!(table[0], (1u64 << 1) | (1u64 << 8) | (1u64 << 9));
        assert_eq!(table[4].count_ones(), 5);
        assert_eq!(table[36].count_ones(), 8);
        assert_eq!(table[63].count_ones(), 3);
    }
}
