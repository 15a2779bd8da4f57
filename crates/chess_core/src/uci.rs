//! Coordinate move text (`e2e4`, `e7e8q`) as used by UCI.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{board::Position, movegen::legal_moves, types::*};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move text must be 4 or 5 characters, got {0}")]
    Length(usize),
    #[error("invalid square '{0}'")]
    Square(String),
    #[error("invalid promotion piece '{0}'")]
    Promotion(char),
}

impl Move {
    /// `0000` for the null move.
    pub fn to_uci(self) -> String {
        self.to_string()
    }

    /// Parse coordinate text, yielding [`Move::NULL`] when it is malformed.
    pub fn from_uci(text: &str) -> Move {
        text.parse().unwrap_or(Move::NULL)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))?;
        if let Some(p) = self.promo {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
            return Err(MoveParseError::Length(txt.chars().count()));
        }
        let square = |s: &str| coord_to_sq(s).ok_or_else(|| MoveParseError::Square(s.to_string()));
        let from = square(&txt[0..2])?;
        let to = square(&txt[2..4])?;
        let promo = match txt[4..].chars().next() {
            None => None,
            Some(c) => match c {
                'q' | 'r' | 'b' | 'n' => PieceKind::from_char(c),
                _ => return Err(MoveParseError::Promotion(c)),
            },
        };
        Ok(Move { from, to, promo })
    }
}

/// Resolve coordinate text against the legal moves of `pos`.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let wanted: Move = txt.parse().ok()?;
    legal_moves(pos).into_iter().find(|&m| m == wanted)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
