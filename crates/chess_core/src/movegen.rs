//! Pseudo-legal and legal move generation.
//!
//! Legality is decided by copy-make: each candidate is applied to a copy of
//! the position and kept only if [`Position::apply_move`] accepts it.

use crate::{
    attacks::{pawn_attacks, piece_attacks},
    bitboard::Bitboard,
    board::{CASTLES, Position},
    types::*,
};

/// Every square attacked by at least one piece of `color`.
pub fn attacked_squares(pos: &Position, color: Color) -> Bitboard {
    let occ = pos.occupied();
    let mut attacked = Bitboard::EMPTY;
    for kind in PieceKind::ALL {
        for sq in pos.pieces(color, kind) {
            attacked |= piece_attacks(kind, sq, color, occ);
        }
    }
    attacked
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves_into(pos, out);
    out.retain(|&mv| pos.clone().apply_move(mv));
}

/// Moves that follow piece movement rules but may leave the king attacked.
pub fn pseudo_legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_moves_into(pos, &mut out);
    out
}

fn pseudo_moves_into(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let own = pos.color_bb(us);
    let occ = pos.occupied();

    gen_pawns(pos, us, out);

    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        for from in pos.pieces(us, kind) {
            for to in piece_attacks(kind, from, us, occ) & !own {
                out.push(Move::new(from, to));
            }
        }
    }

    gen_castles(pos, us, out);
}

fn push_pawn_move(from: u8, to: u8, c: Color, out: &mut Vec<Move>) {
    if rank_of(to) == c.promotion_rank() {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::with_promo(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawns(pos: &Position, c: Color, out: &mut Vec<Move>) {
    let occ = pos.occupied();
    let enemies = pos.color_bb(c.other());
    let ep_target = pos.en_passant().map_or(Bitboard::EMPTY, Bitboard::from_square);

    for from in pos.pieces(c, PieceKind::Pawn) {
        let single = match c {
            Color::White => Bitboard::from_square(from).north(),
            Color::Black => Bitboard::from_square(from).south(),
        };

        // forward 1, and forward 2 from the home rank
        if let Some(to) = (single & !occ).lsb() {
            push_pawn_move(from, to, c, out);
            if rank_of(from) == c.pawn_home_rank() {
                let double = match c {
                    Color::White => single.north(),
                    Color::Black => single.south(),
                };
                if let Some(to2) = (double & !occ).lsb() {
                    out.push(Move::new(from, to2));
                }
            }
        }

        // captures + en-passant
        let attacks = pawn_attacks(from, c);
        for to in attacks & enemies {
            push_pawn_move(from, to, c, out);
        }
        for to in attacks & ep_target & !occ {
            out.push(Move::new(from, to));
        }
    }
}

fn gen_castles(pos: &Position, c: Color, out: &mut Vec<Move>) {
    for castle in CASTLES.iter().filter(|castle| castle.color == c) {
        if pos.castle_allowed(castle) {
            out.push(Move::new(castle.king_from, castle.king_to));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
