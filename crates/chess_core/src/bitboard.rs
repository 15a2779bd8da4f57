//! 64-bit square sets and the fixed board-geometry masks.
//!
//! Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8 (rank-major, little-endian).
//! All masks are `const` data; nothing in this module is mutable after
//! compilation.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::types::{file_of, rank_of, square_of};

/// A set of squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

const fn build_files() -> [Bitboard; 8] {
    let mut out = [Bitboard(0); 8];
    let mut f = 0;
    while f < 8 {
        out[f] = Bitboard(0x0101010101010101u64 << f);
        f += 1;
    }
    out
}

const fn build_ranks() -> [Bitboard; 8] {
    let mut out = [Bitboard(0); 8];
    let mut r = 0;
    while r < 8 {
        out[r] = Bitboard(0xFFu64 << (r * 8));
        r += 1;
    }
    out
}

// anti == false: a1-h8 direction, indexed 7 + rank - file.
// anti == true: h1-a8 direction, indexed rank + file.
const fn build_diagonals(anti: bool) -> [Bitboard; 15] {
    let mut out = [Bitboard(0); 15];
    let mut sq = 0u8;
    while sq < 64 {
        let idx = if anti {
            (rank_of(sq) + file_of(sq)) as usize
        } else {
            (7 + rank_of(sq) - file_of(sq)) as usize
        };
        out[idx].0 |= 1u64 << sq;
        sq += 1;
    }
    out
}

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const FILES: [Bitboard; 8] = build_files();
    pub const RANKS: [Bitboard; 8] = build_ranks();
    /// a1-h8 style diagonals. Index 7 is the long diagonal a1-h8,
    /// index 0 is h1 alone, index 14 is a8 alone.
    pub const DIAGONALS: [Bitboard; 15] = build_diagonals(false);
    /// h1-a8 style anti-diagonals. Index 0 is a1 alone, index 7 is h1-a8,
    /// index 14 is h8 alone.
    pub const ANTI_DIAGONALS: [Bitboard; 15] = build_diagonals(true);

    /// Squares where `(rank + file)` is odd, i.e. the light squares.
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55AA55AA55AA55AA);

    #[inline(always)]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u64 << sq)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, sq: u8) -> bool {
        (self.0 & (1u64 << sq)) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, sq: u8) {
        self.0 |= 1u64 << sq;
    }

    #[inline(always)]
    pub fn clear(&mut self, sq: u8) {
        self.0 &= !(1u64 << sq);
    }

    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest set square, `None` when empty.
    #[inline(always)]
    pub const fn lsb(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Highest set square, `None` when empty.
    #[inline(always)]
    pub const fn msb(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(63 - self.0.leading_zeros() as u8)
        }
    }

    /// Remove and return the lowest set square.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<u8> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Squares strictly above `sq` in index order.
    #[inline(always)]
    pub const fn above(sq: u8) -> Bitboard {
        if sq >= 63 {
            Bitboard::EMPTY
        } else {
            Bitboard(!0u64 << (sq + 1))
        }
    }

    /// Squares strictly below `sq` in index order.
    #[inline(always)]
    pub const fn below(sq: u8) -> Bitboard {
        Bitboard((1u64 << sq) - 1)
    }

    #[inline(always)]
    pub const fn north(self) -> Bitboard {
        Bitboard(self.0 << 8)
    }

    #[inline(always)]
    pub const fn south(self) -> Bitboard {
        Bitboard(self.0 >> 8)
    }
}

macro_rules! bitboard_op {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $tok:tt) => {
        impl $op for Bitboard {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                Bitboard(self.0 $tok rhs.0)
            }
        }

        impl $assign_op for Bitboard {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = self.0 $tok rhs.0;
            }
        }
    };
}

bitboard_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
bitboard_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
bitboard_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

/// Iterates set squares from a1 upwards, consuming the set.
impl Iterator for Bitboard {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lsb()
    }
}

/// 8x8 grid with rank 8 on top and `X` on set squares.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BORDER: &str = "  +---+---+---+---+---+---+---+---+";
        writeln!(f, "{BORDER}")?;
        for rank in (0..8u8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8u8 {
                let mark = if self.contains(square_of(rank, file)) {
                    'X'
                } else {
                    ' '
                };
                write!(f, " {mark} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{BORDER}")?;
        }
        writeln!(f, "    a   b   c   d   e   f   g   h")
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
