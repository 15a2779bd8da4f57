//! Bitboard chess position: attack tables, move application with full rule
//! checking, legal move generation, FEN and UCI coordinate notation.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use fen::{FenError, START_FEN};
pub use movegen::*;
pub use perft::{divide, perft};
pub use types::*;
pub use uci::*;
