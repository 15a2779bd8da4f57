//! Forsyth-Edwards Notation for [`Position`].
//!
//! Only the strict six-field form is accepted: placement, side to move,
//! castling rights, en-passant square, halfmove clock, fullmove number.

use std::fmt::Write as _;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::board::{CastlingRights, Position};
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankLength { rank: u8 },
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),
    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),
    #[error("invalid halfmove clock '{0}'")]
    InvalidHalfmove(String),
    #[error("invalid fullmove number '{0}'")]
    InvalidFullmove(String),
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [placement, side, castling, ep, halfmove, fullmove] = parts[..] else {
            return Err(FenError::FieldCount(parts.len()));
        };

        let mut pos = Position::empty();
        parse_placement(placement, &mut pos)?;

        let side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::InvalidSide(side.to_string())),
        };
        pos.set_side_to_move(side_to_move);
        pos.set_castling(parse_castling(castling)?);
        pos.set_en_passant(parse_en_passant(ep, side_to_move)?);

        let halfmove_clock: u32 = halfmove
            .parse()
            .map_err(|_| FenError::InvalidHalfmove(halfmove.to_string()))?;
        let fullmove_number: u32 = fullmove
            .parse()
            .map_err(|_| FenError::InvalidFullmove(fullmove.to_string()))?;
        pos.set_clocks(halfmove_clock, fullmove_number);

        pos.update_combined();
        Ok(pos)
    }

    /// Replace this position with the one described by `fen`.
    ///
    /// Returns `false` and leaves the position untouched if `fen` is malformed.
    pub fn set_from_fen(&mut self, fen: &str) -> bool {
        match Position::from_fen(fen) {
            Ok(pos) => {
                *self = pos;
                true
            }
            Err(err) => {
                debug!(%err, fen, "rejected FEN");
                false
            }
        }
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(square_of(rank, file)) {
                    Some(pc) => {
                        if empty > 0 {
                            let _ = write!(out, "{empty}");
                            empty = 0;
                        }
                        out.push(pc.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(out, "{empty}");
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });
        out.push(' ');
        out.push_str(&castling_field(self.castling()));
        out.push(' ');
        match self.en_passant() {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }
        let _ = write!(
            out,
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        );
        out
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

fn parse_placement(placement: &str, pos: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
        let mut file: u8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += d as u8;
            } else {
                let pc = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                if file >= 8 {
                    return Err(FenError::RankLength { rank: rank + 1 });
                }
                pos.put_piece(square_of(rank, file), pc);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankLength { rank: rank + 1 });
            }
        }
        if file != 8 {
            return Err(FenError::RankLength { rank: rank + 1 });
        }
    }
    Ok(())
}

/// The target lies behind a pawn of the side that just moved: rank 6 when
/// White is to move, rank 3 when Black is.
fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<u8>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let target_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    match coord_to_sq(field) {
        Some(sq) if rank_of(sq) == target_rank => Ok(Some(sq)),
        _ => Err(FenError::InvalidEnPassant(field.to_string())),
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        rights.insert(match c {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling(c)),
        });
    }
    Ok(rights)
}

/// `KQkq` subset in canonical order, or `-`.
pub(crate) fn castling_field(rights: CastlingRights) -> String {
    if rights.is_empty() {
        return "-".to_string();
    }
    [
        (CastlingRights::WHITE_KINGSIDE, 'K'),
        (CastlingRights::WHITE_QUEENSIDE, 'Q'),
        (CastlingRights::BLACK_KINGSIDE, 'k'),
        (CastlingRights::BLACK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|&(right, _)| rights.has(right))
    .map(|(_, c)| c)
    .collect()
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
