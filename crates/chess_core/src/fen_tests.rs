use super::*;
use crate::bitboard::Bitboard;

#[test]
fn test_startpos_roundtrip() {
    let pos = Position::from_fen(START_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(pos.to_fen(), START_FEN);
}

#[test]
fn test_roundtrip_preserves_state() {
    let fens = [
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/8/8/8/8/8/8/4K2R b K - 37 112",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(Position::from_fen(&pos.to_fen()).unwrap(), pos);
    }
}

#[test]
fn test_parsed_fields() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w Kq f6 4 3").unwrap();
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(
        pos.castling(),
        CastlingRights::from_bits(
            CastlingRights::WHITE_KINGSIDE.bits() | CastlingRights::BLACK_QUEENSIDE.bits()
        )
    );
    assert_eq!(pos.en_passant(), coord_to_sq("f6"));
    assert_eq!(pos.halfmove_clock(), 4);
    assert_eq!(pos.fullmove_number(), 3);
    assert_eq!(
        pos.piece_at(coord_to_sq("e5").unwrap()),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(pos.occupied().popcount(), 32);
    assert_eq!(
        pos.color_bb(Color::White) & pos.color_bb(Color::Black),
        Bitboard::EMPTY
    );
}

#[test]
fn test_rejects_malformed() {
    let bad = [
        // too few / too many fields
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", FenError::FieldCount(4)),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
            FenError::FieldCount(7),
        ),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1", FenError::RankCount(7)),
        ("rnbqkbnr/ppxppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", FenError::InvalidPiece('x')),
        ("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", FenError::RankLength { rank: 7 }),
        ("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", FenError::InvalidPiece('9')),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            FenError::InvalidSide("x".to_string()),
        ),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1", FenError::InvalidCastling('x')),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
            FenError::InvalidEnPassant("z9".to_string()),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            FenError::InvalidHalfmove("x".to_string()),
        ),
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 -1",
            FenError::InvalidFullmove("-1".to_string()),
        ),
    ];
    for (fen, expected) in bad {
        assert_eq!(Position::from_fen(fen), Err(expected), "FEN: {fen}");
    }
}

#[test]
fn test_en_passant_rank_must_match_side() {
    // e4 is never an en-passant target
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - e4 0 1"),
        Err(FenError::InvalidEnPassant("e4".to_string()))
    );
    // rank 3 target with White to move
    assert_eq!(
        Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1"),
        Err(FenError::InvalidEnPassant("e3".to_string()))
    );
    // rank 6 target with Black to move
    assert_eq!(
        Position::from_fen("4k3/8/8/4p3/8/8/8/4K3 b - e6 0 1"),
        Err(FenError::InvalidEnPassant("e6".to_string()))
    );

    let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
    assert_eq!(pos.en_passant(), coord_to_sq("e3"));
    let pos = Position::from_fen("4k3/8/8/4p3/8/8/8/4K3 w - e6 0 1").unwrap();
    assert_eq!(pos.en_passant(), coord_to_sq("e6"));
}

#[test]
fn test_set_from_fen_keeps_position_on_failure() {
    let mut pos = Position::startpos();
    assert!(pos.set_from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1"));
    let before = pos.clone();
    assert!(!pos.set_from_fen("8/8/8/4k3/8/8/8/4K3 w - -"));
    assert_eq!(pos, before);
}

#[test]
fn test_from_str() {
    let pos: Position = START_FEN.parse().unwrap();
    assert_eq!(pos.legal_moves().len(), 20);
    assert!("not a fen".parse::<Position>().is_err());
}

#[test]
fn test_castling_field() {
    assert_eq!(castling_field(CastlingRights::ALL), "KQkq");
    assert_eq!(castling_field(CastlingRights::NONE), "-");
    assert_eq!(castling_field(CastlingRights::BLACK_KINGSIDE), "k");
}
