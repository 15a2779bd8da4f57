use std::fmt;

use tracing::trace;

use crate::{attacks::*, bitboard::Bitboard, movegen, types::*};

/// Castling rights as a 4-flag bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: CastlingRights = CastlingRights(1);
    pub const WHITE_QUEENSIDE: CastlingRights = CastlingRights(2);
    pub const BLACK_KINGSIDE: CastlingRights = CastlingRights(4);
    pub const BLACK_QUEENSIDE: CastlingRights = CastlingRights(8);
    pub const ALL: CastlingRights = CastlingRights(15);

    pub const fn from_bits(bits: u8) -> Self {
        CastlingRights(bits & 15)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `rights` is present.
    pub const fn has(self, rights: CastlingRights) -> bool {
        self.0 & rights.0 == rights.0
    }

    pub fn insert(&mut self, rights: CastlingRights) {
        self.0 |= rights.0;
    }

    pub fn remove(&mut self, rights: CastlingRights) {
        self.0 &= !rights.0;
    }

    /// Both flags belonging to `color`.
    pub const fn for_color(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights(1 | 2),
            Color::Black => CastlingRights(4 | 8),
        }
    }

    /// The flag tied to a rook's starting corner, if `sq` is one for `color`.
    pub const fn for_corner(color: Color, sq: u8) -> Option<CastlingRights> {
        match (color, sq) {
            (Color::White, 0) => Some(Self::WHITE_QUEENSIDE),
            (Color::White, 7) => Some(Self::WHITE_KINGSIDE),
            (Color::Black, 56) => Some(Self::BLACK_QUEENSIDE),
            (Color::Black, 63) => Some(Self::BLACK_KINGSIDE),
            _ => None,
        }
    }
}

/// Fixed geometry of one of the four castling moves.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Castle {
    pub color: Color,
    pub right: CastlingRights,
    pub king_from: u8,
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Squares between king and rook; must be empty.
    pub between: Bitboard,
    /// King origin, transit and destination; must not be attacked.
    pub king_path: [u8; 3],
}

pub(crate) const CASTLES: [Castle; 4] = [
    Castle {
        color: Color::White,
        right: CastlingRights::WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        between: Bitboard((1u64 << 5) | (1u64 << 6)),
        king_path: [4, 5, 6],
    },
    Castle {
        color: Color::White,
        right: CastlingRights::WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        between: Bitboard((1u64 << 1) | (1u64 << 2) | (1u64 << 3)),
        king_path: [4, 3, 2],
    },
    Castle {
        color: Color::Black,
        right: CastlingRights::BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        between: Bitboard((1u64 << 61) | (1u64 << 62)),
        king_path: [60, 61, 62],
    },
    Castle {
        color: Color::Black,
        right: CastlingRights::BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        between: Bitboard((1u64 << 57) | (1u64 << 58) | (1u64 << 59)),
        king_path: [60, 59, 58],
    },
];

fn castle_for(color: Color, from: u8, to: u8) -> Option<&'static Castle> {
    CASTLES
        .iter()
        .find(|c| c.color == color && c.king_from == from && c.king_to == to)
}

/// Outcome classification of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// A chess position held as twelve piece bitboards plus game state.
///
/// The per-color unions and the total occupancy are always rebuilt from the
/// twelve piece bitboards after a mutation, never patched incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pieces: [[Bitboard; 6]; 2], // [color][kind]
    by_color: [Bitboard; 2],
    occupied: Bitboard,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<u8>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    /// A board with no pieces, White to move and no rights.
    pub fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            by_color: [Bitboard::EMPTY; 2],
            occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        let w = Color::White.idx();
        let b = Color::Black.idx();
        p.pieces[w] = [
            Bitboard(0x000000000000FF00),
            Bitboard(0x0000000000000042),
            Bitboard(0x0000000000000024),
            Bitboard(0x0000000000000081),
            Bitboard(0x0000000000000008),
            Bitboard(0x0000000000000010),
        ];
        p.pieces[b] = [
            Bitboard(0x00FF000000000000),
            Bitboard(0x4200000000000000),
            Bitboard(0x2400000000000000),
            Bitboard(0x8100000000000000),
            Bitboard(0x0800000000000000),
            Bitboard(0x1000000000000000),
        ];
        p.castling = CastlingRights::ALL;
        p.update_combined();
        p
    }

    /// Restore the standard starting position in place.
    pub fn reset(&mut self) {
        *self = Position::startpos();
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }
    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline(always)]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.idx()][kind.idx()]
    }
    #[inline(always)]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.by_color[color.idx()]
    }
    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }
    pub(crate) fn set_castling(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }
    pub(crate) fn set_en_passant(&mut self, sq: Option<u8>) {
        self.en_passant = sq;
    }
    pub(crate) fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Place a piece on an empty square. Callers rebuild the unions.
    pub(crate) fn put_piece(&mut self, sq: u8, pc: Piece) {
        self.pieces[pc.color.idx()][pc.kind.idx()].set(sq);
    }

    pub(crate) fn update_combined(&mut self) {
        for color in Color::BOTH {
            self.by_color[color.idx()] = self.pieces[color.idx()]
                .iter()
                .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        }
        self.occupied = self.by_color[0] | self.by_color[1];
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        if sq >= NO_SQUARE || !self.occupied.contains(sq) {
            return None;
        }
        let color = if self.by_color[0].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.pieces(color, kind).contains(sq))
            .map(|kind| Piece { color, kind })
    }

    /// `None` when `c` has no king, which only happens in malformed positions.
    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(c, PieceKind::King).lsb()
    }

    // ---------------------------------------------------------------------
    // Attack queries
    // ---------------------------------------------------------------------

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Whether any piece of `by` attacks `target`.
    ///
    /// Pawns are found by looking up the pawn table of the *defending* color
    /// from `target`: a `by` pawn attacks `target` exactly when a pawn of the
    /// other color on `target` would attack that pawn's square.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let occ = self.occupied;
        let queens = self.pieces(by, PieceKind::Queen);

        !(pawn_attacks(target, by.other()) & self.pieces(by, PieceKind::Pawn)).is_empty()
            || !(knight_attacks(target) & self.pieces(by, PieceKind::Knight)).is_empty()
            || !(king_attacks(target) & self.pieces(by, PieceKind::King)).is_empty()
            || !(bishop_attacks(target, occ) & (self.pieces(by, PieceKind::Bishop) | queens))
                .is_empty()
            || !(rook_attacks(target, occ) & (self.pieces(by, PieceKind::Rook) | queens))
                .is_empty()
    }

    /// Rights, rook presence, empty squares and an unattacked king path.
    pub(crate) fn castle_allowed(&self, castle: &Castle) -> bool {
        let us = castle.color;
        self.castling.has(castle.right)
            && self.pieces(us, PieceKind::King).contains(castle.king_from)
            && self.pieces(us, PieceKind::Rook).contains(castle.rook_from)
            && (self.occupied & castle.between).is_empty()
            && castle
                .king_path
                .iter()
                .all(|&s| !self.is_square_attacked(s, us.other()))
    }

    /// Whether `mv` is geometrically possible for `moved` on this board,
    /// ignoring checks. Castling is validated separately.
    fn is_reachable(&self, moved: Piece, mv: Move) -> bool {
        let us = moved.color;
        if moved.kind != PieceKind::Pawn {
            return piece_attacks(moved.kind, mv.from, us, self.occupied).contains(mv.to);
        }

        let forward: i16 = match us {
            Color::White => 8,
            Color::Black => -8,
        };
        let delta = mv.to as i16 - mv.from as i16;
        let empty = |s: u8| !self.occupied.contains(s);

        if delta == forward {
            empty(mv.to)
        } else if delta == 2 * forward {
            let mid = (mv.from as i16 + forward) as u8;
            rank_of(mv.from) == us.pawn_home_rank() && empty(mid) && empty(mv.to)
        } else if pawn_attacks(mv.from, us).contains(mv.to) {
            self.color_bb(us.other()).contains(mv.to) || self.en_passant == Some(mv.to)
        } else {
            false
        }
    }

    // ---------------------------------------------------------------------
    // Move application
    // ---------------------------------------------------------------------

    /// Apply `mv` for the side to move.
    ///
    /// Returns `false` for a move that cannot be played here, including one
    /// that would leave the mover's own king attacked. A rejected move leaves
    /// the position exactly as it was before the call.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        if mv.is_null() {
            return reject(mv, "null move");
        }
        let us = self.side_to_move;
        let them = us.other();
        let (from, to) = (mv.from, mv.to);

        let Some(moved) = self.piece_at(from) else {
            return reject(mv, "no piece on origin square");
        };
        if moved.color != us {
            return reject(mv, "piece does not belong to side to move");
        }
        let captured = self.piece_at(to);
        if captured.is_some_and(|c| c.color == us) {
            return reject(mv, "destination holds own piece");
        }

        let castle = match moved.kind {
            PieceKind::King => castle_for(us, from, to),
            _ => None,
        };
        if let Some(castle) = castle {
            if !self.castle_allowed(castle) {
                return reject(mv, "castling not permitted");
            }
        } else if !self.is_reachable(moved, mv) {
            return reject(mv, "piece cannot reach destination");
        }

        let is_pawn = moved.kind == PieceKind::Pawn;
        if is_pawn {
            match mv.promo {
                Some(promo) if !promo.is_promotion_target() => {
                    return reject(mv, "invalid promotion piece");
                }
                Some(_) if rank_of(to) != us.promotion_rank() => {
                    return reject(mv, "promotion away from last rank");
                }
                None if rank_of(to) == us.promotion_rank() => {
                    return reject(mv, "missing promotion piece");
                }
                _ => {}
            }
        } else if mv.promo.is_some() {
            return reject(mv, "promotion on a non-pawn move");
        }

        let saved = self.clone();
        let mut is_capture = captured.is_some();
        let mut next_ep = None;

        if let Some(castle) = castle {
            self.relocate(us, PieceKind::King, castle.king_from, castle.king_to);
            self.relocate(us, PieceKind::Rook, castle.rook_from, castle.rook_to);
            self.castling.remove(CastlingRights::for_color(us));
        } else if is_pawn && self.en_passant == Some(to) {
            let victim = match us {
                Color::White => to - 8,
                Color::Black => to + 8,
            };
            self.pieces[them.idx()][PieceKind::Pawn.idx()].clear(victim);
            self.relocate(us, PieceKind::Pawn, from, to);
            is_capture = true;
        } else if is_pawn && let Some(promo) = mv.promo {
            self.pieces[us.idx()][PieceKind::Pawn.idx()].clear(from);
            self.remove_captured(captured, to);
            self.pieces[us.idx()][promo.idx()].set(to);
        } else if is_pawn && rank_of(from).abs_diff(rank_of(to)) == 2 {
            self.relocate(us, PieceKind::Pawn, from, to);
            next_ep = Some((from + to) / 2);
        } else {
            match moved.kind {
                PieceKind::King => self.castling.remove(CastlingRights::for_color(us)),
                PieceKind::Rook => {
                    if let Some(right) = CastlingRights::for_corner(us, from) {
                        self.castling.remove(right);
                    }
                }
                _ => {}
            }
            self.remove_captured(captured, to);
            self.relocate(us, moved.kind, from, to);
        }

        if let Some(cap) = captured
            && cap.kind == PieceKind::Rook
            && let Some(right) = CastlingRights::for_corner(cap.color, to)
        {
            self.castling.remove(right);
        }
        self.en_passant = next_ep;

        self.update_combined();

        if self.in_check(us) {
            *self = saved;
            return reject(mv, "leaves own king in check");
        }

        self.side_to_move = them;
        // counters saturate; FEN accepts any u32
        self.halfmove_clock = if is_pawn || is_capture {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if self.side_to_move == Color::White {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        true
    }

    fn relocate(&mut self, color: Color, kind: PieceKind, from: u8, to: u8) {
        let bb = &mut self.pieces[color.idx()][kind.idx()];
        bb.clear(from);
        bb.set(to);
    }

    fn remove_captured(&mut self, captured: Option<Piece>, sq: u8) {
        if let Some(cap) = captured {
            self.pieces[cap.color.idx()][cap.kind.idx()].clear(sq);
        }
    }

    // ---------------------------------------------------------------------
    // Game status
    // ---------------------------------------------------------------------

    /// All legal moves for the side to move (order unspecified).
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// 100 plies without a pawn move or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Bare kings, a lone minor piece, or one bishop each on the same
    /// square color.
    pub fn is_insufficient_material(&self) -> bool {
        let white = Color::White;
        let black = Color::Black;
        match self.occupied.popcount() {
            2 => true,
            3 => {
                let minors = self.pieces(white, PieceKind::Knight)
                    | self.pieces(white, PieceKind::Bishop)
                    | self.pieces(black, PieceKind::Knight)
                    | self.pieces(black, PieceKind::Bishop);
                minors.popcount() == 1
            }
            4 => {
                let wb = self.pieces(white, PieceKind::Bishop);
                let bb = self.pieces(black, PieceKind::Bishop);
                if wb.popcount() != 1
                    || bb.popcount() != 1
                    || self.color_bb(white).popcount() != 2
                    || self.color_bb(black).popcount() != 2
                {
                    return false;
                }
                let light = Bitboard::LIGHT_SQUARES;
                (wb & light).is_empty() == (bb & light).is_empty()
            }
            _ => false,
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            if self.in_check(self.side_to_move) {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if self.is_fifty_move_draw() {
            GameStatus::FiftyMoveRule
        } else if self.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else {
            GameStatus::Ongoing
        }
    }
}

fn reject(mv: Move, reason: &'static str) -> bool {
    trace!(mv = %mv, reason, "move rejected");
    false
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BORDER: &str = "  +---+---+---+---+---+---+---+---+";
        writeln!(f, "{BORDER}")?;
        for rank in (0..8u8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8u8 {
                let c = self
                    .piece_at(square_of(rank, file))
                    .map_or(' ', Piece::to_fen_char);
                write!(f, " {c} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{BORDER}")?;
        }
        writeln!(f, "    a   b   c   d   e   f   g   h")?;
        let side = match self.side_to_move {
            Color::White => "White",
            Color::Black => "Black",
        };
        writeln!(f, "Side to move: {side}")?;
        writeln!(f, "Castling: {}", crate::fen::castling_field(self.castling))?;
        if let Some(ep) = self.en_passant {
            writeln!(f, "En passant: {}", sq_to_coord(ep))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
