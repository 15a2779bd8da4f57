//! Pre-computed attack tables and sliding-piece ray casts.
//!
//! - Knight, king and pawn-capture tables (pawn tables per color)
//! - Ray tables built from the rank/file/diagonal masks
//! - Classical ray-cast sliding attacks (no magic bitboards)
//!
//! Every table is a `static` evaluated at compile time, so lookups are
//! always initialized.

use crate::bitboard::Bitboard;
use crate::types::{Color, PieceKind, file_of, rank_of};

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let file = file_of(sq) as i8;
        let rank = rank_of(sq) as i8;
        let mut bb = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bb |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        attacks[sq as usize] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);

pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);

/// Pawn capture targets, indexed `[color][square]`.
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&[(-1, 1), (1, 1)]),
    leaper_table(&[(-1, -1), (1, -1)]),
];

#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq as usize]
}

#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

// =============================================================================
// Sliding pieces
// =============================================================================

const N: usize = 0;
const NE: usize = 1;
const E: usize = 2;
const SE: usize = 3;
const S: usize = 4;
const SW: usize = 5;
const W: usize = 6;
const NW: usize = 7;

/// RAYS[direction][square]: every square from `square` to the board edge in
/// that direction, exclusive of `square`.
/// Directions: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW.
pub static RAYS: [[Bitboard; 64]; 8] = {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut sq = 0u8;
    while sq < 64 {
        let s = sq as usize;
        let rank = rank_of(sq) as usize;
        let file = file_of(sq) as usize;
        let up = Bitboard::above(sq).0;
        let down = Bitboard::below(sq).0;

        let file_mask = Bitboard::FILES[file].0;
        let rank_mask = Bitboard::RANKS[rank].0;
        let diag = Bitboard::DIAGONALS[7 + rank - file].0;
        let anti = Bitboard::ANTI_DIAGONALS[rank + file].0;

        rays[N][s] = Bitboard(file_mask & up);
        rays[NE][s] = Bitboard(diag & up);
        rays[E][s] = Bitboard(rank_mask & up);
        rays[SE][s] = Bitboard(anti & down);
        rays[S][s] = Bitboard(file_mask & down);
        rays[SW][s] = Bitboard(diag & down);
        rays[W][s] = Bitboard(rank_mask & down);
        rays[NW][s] = Bitboard(anti & up);
        sq += 1;
    }
    rays
};

/// Ray in `dir` up to and including the first occupied square.
#[inline(always)]
fn ray_attacks(dir: usize, sq: u8, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq as usize];
    let blockers = ray & occupied;
    // Rays pointing up the board meet their nearest blocker at the lowest
    // index, rays pointing down at the highest.
    let nearest = match dir {
        N | NE | E | NW => blockers.lsb(),
        _ => blockers.msb(),
    };
    match nearest {
        Some(blocker) => ray & !RAYS[dir][blocker as usize],
        None => ray,
    }
}

#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(NE, sq, occupied)
        | ray_attacks(NW, sq, occupied)
        | ray_attacks(SE, sq, occupied)
        | ray_attacks(SW, sq, occupied)
}

#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(N, sq, occupied)
        | ray_attacks(E, sq, occupied)
        | ray_attacks(S, sq, occupied)
        | ray_attacks(W, sq, occupied)
}

#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Squares a piece of `kind` and `color` on `sq` attacks given `occupied`.
///
/// `color` only matters for pawns. Own pieces are not filtered out here;
/// blockers of either color end a ray and are included in it.
pub fn piece_attacks(kind: PieceKind, sq: u8, color: Color, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_attacks(sq, color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupied),
        PieceKind::Rook => rook_attacks(sq, occupied),
        PieceKind::Queen => queen_attacks(sq, occupied),
        PieceKind::King => king_attacks(sq),
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
