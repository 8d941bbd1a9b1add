//! Precomputed per-square move and attack masks.
//!
//! `AttackTables` is built once and never mutated. The move generator holds a
//! shared reference to it; `AttackTables::shared()` lazily builds the
//! process-wide instance on first use.

use once_cell::sync::Lazy;

use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::moves::king_moves::generate_king_table;
use crate::moves::knight_moves::generate_knight_table;
use crate::moves::pawn_moves::generate_pawn_tables;
use crate::moves::ray_moves::{
    generate_ray_tables, Direction, ALL_DIRECTIONS, DIAGONAL_DIRECTIONS, STRAIGHT_DIRECTIONS,
};

static SHARED_TABLES: Lazy<AttackTables> = Lazy::new(AttackTables::new);

/// Sets the bit for `(file, rank)` when it lies on the board. Returns whether
/// it did, so ray walkers can stop at the edge.
#[inline]
pub(crate) fn set_if_on_board(bitboard: &mut Bitboard, file: i32, rank: i32) -> bool {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        *bitboard |= 1u64 << (rank * 8 + file);
        true
    } else {
        false
    }
}

#[derive(Clone)]
pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    /// [direction][square], unblocked.
    rays: [[Bitboard; 64]; 8],
    straight: [Bitboard; 64],
    diagonal: [Bitboard; 64],
    /// [color][square]
    pawn_push: [[Bitboard; 64]; 2],
    pawn_double_push: [[Bitboard; 64]; 2],
    pawn_captures: [[Bitboard; 64]; 2],
    double_push_eligible: [Bitboard; 64],
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackTables {
    pub fn new() -> Self {
        let rays = generate_ray_tables();
        let pawns = generate_pawn_tables();

        let mut straight = [0u64; 64];
        let mut diagonal = [0u64; 64];
        for sq in 0..64 {
            straight[sq] = STRAIGHT_DIRECTIONS
                .iter()
                .fold(0, |acc, d| acc | rays[d.index()][sq]);
            diagonal[sq] = DIAGONAL_DIRECTIONS
                .iter()
                .fold(0, |acc, d| acc | rays[d.index()][sq]);
        }

        log::debug!("attack tables built");

        Self {
            knight: generate_knight_table(),
            king: generate_king_table(),
            rays,
            straight,
            diagonal,
            pawn_push: pawns.push,
            pawn_double_push: pawns.double_push,
            pawn_captures: pawns.captures,
            double_push_eligible: pawns.double_push_eligible,
        }
    }

    /// Process-wide tables, built on first call.
    pub fn shared() -> &'static AttackTables {
        &SHARED_TABLES
    }

    #[inline]
    pub fn knight(&self, square: Square) -> Bitboard {
        self.knight[square as usize]
    }

    #[inline]
    pub fn king(&self, square: Square) -> Bitboard {
        self.king[square as usize]
    }

    /// Unblocked ray from `square` in `direction`.
    #[inline]
    pub fn ray(&self, direction: Direction, square: Square) -> Bitboard {
        self.rays[direction.index()][square as usize]
    }

    /// Unblocked rook mask (all four straight rays).
    #[inline]
    pub fn straight(&self, square: Square) -> Bitboard {
        self.straight[square as usize]
    }

    /// Unblocked bishop mask (all four diagonal rays).
    #[inline]
    pub fn diagonal(&self, square: Square) -> Bitboard {
        self.diagonal[square as usize]
    }

    #[inline]
    pub fn queen(&self, square: Square) -> Bitboard {
        self.straight[square as usize] | self.diagonal[square as usize]
    }

    #[inline]
    pub fn pawn_push(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_push[color.index()][square as usize]
    }

    #[inline]
    pub fn pawn_double_push(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_double_push[color.index()][square as usize]
    }

    #[inline]
    pub fn pawn_captures(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_captures[color.index()][square as usize]
    }

    #[inline]
    pub fn is_double_push_eligible(&self, square: Square) -> bool {
        self.double_push_eligible[square as usize] != 0
    }

    /// Ray from `square` cut after the first occupied square. The blocker is
    /// included whatever its color; callers mask out their own pieces.
    #[inline]
    pub fn blocked_ray(&self, direction: Direction, square: Square, occupancy: Bitboard) -> Bitboard {
        let ray = self.rays[direction.index()][square as usize];
        let blockers = ray & occupancy;
        if blockers == 0 {
            return ray;
        }

        let nearest = if direction.is_ascending() {
            blockers.trailing_zeros()
        } else {
            63 - blockers.leading_zeros()
        };
        ray & !self.rays[direction.index()][nearest as usize]
    }

    pub fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        STRAIGHT_DIRECTIONS
            .iter()
            .fold(0, |acc, &d| acc | self.blocked_ray(d, square, occupancy))
    }

    pub fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        DIAGONAL_DIRECTIONS
            .iter()
            .fold(0, |acc, &d| acc | self.blocked_ray(d, square, occupancy))
    }

    pub fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        ALL_DIRECTIONS
            .iter()
            .fold(0, |acc, &d| acc | self.blocked_ray(d, square, occupancy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_tables_match_a_fresh_build() {
        let fresh = AttackTables::new();
        let shared = AttackTables::shared();
        for sq in 0..64u8 {
            assert_eq!(fresh.knight(sq), shared.knight(sq));
            assert_eq!(fresh.queen(sq), shared.queen(sq));
            assert_eq!(
                fresh.pawn_captures(Color::Black, sq),
                shared.pawn_captures(Color::Black, sq)
            );
        }
    }

    #[test]
    fn rook_blocker_stops_ray_and_is_included() {
        let tables = AttackTables::shared();
        let blocker_on_a4 = 1u64 << 24;
        let attacks = tables.rook_attacks(0, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_eq!(attacks.count_ones(), 3 + 7);
    }

    #[test]
    fn descending_ray_stops_at_nearest_blocker() {
        let tables = AttackTables::shared();
        // Bishop on h8, blockers on e5 and b2.
        let occupancy = (1u64 << 36) | (1u64 << 9);
        let attacks = tables.blocked_ray(Direction::SouthWest, 63, occupancy);
        assert_eq!(attacks, (1u64 << 54) | (1u64 << 45) | (1u64 << 36));
    }

    #[test]
    fn empty_board_slider_masks_equal_raw_rays() {
        let tables = AttackTables::shared();
        for sq in 0..64u8 {
            assert_eq!(tables.rook_attacks(sq, 0), tables.straight(sq));
            assert_eq!(tables.bishop_attacks(sq, 0), tables.diagonal(sq));
            assert_eq!(tables.queen_attacks(sq, 0), tables.queen(sq));
        }
    }

    #[test]
    fn no_mask_contains_its_origin() {
        let tables = AttackTables::shared();
        for sq in 0..64u8 {
            let bit = 1u64 << sq;
            assert_eq!(tables.knight(sq) & bit, 0);
            assert_eq!(tables.king(sq) & bit, 0);
            assert_eq!(tables.queen(sq) & bit, 0);
        }
    }
}
