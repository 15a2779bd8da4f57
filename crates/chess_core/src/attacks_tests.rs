use super::*;

#[test]
fn test_knight_attacks() {
    // Knight on e4 (square 28) should attack 8 squares
    let attacks = knight_attacks(28);
    assert_eq!(attacks.popcount(), 8);

    // Knight on a1 (square 0) should attack 2 squares
    let attacks = knight_attacks(0);
    assert_eq!(attacks.popcount(), 2);
    assert!(attacks.contains(10)); // c2
    assert!(attacks.contains(17)); // b3

    // Knight on h1 (square 7) should attack 2 squares
    let attacks = knight_attacks(7);
    assert_eq!(attacks.popcount(), 2);
}

#[test]
fn test_king_attacks() {
    assert_eq!(king_attacks(28).popcount(), 8);

    let attacks = king_attacks(0);
    assert_eq!(attacks.popcount(), 3);
    assert!(attacks.contains(8)); // a2
    assert!(attacks.contains(1)); // b1
    assert!(attacks.contains(9)); // b2
}

#[test]
fn test_pawn_attacks() {
    // White pawn on e4 attacks d5 and f5
    let attacks = pawn_attacks(28, Color::White);
    assert_eq!(attacks.popcount(), 2);
    assert!(attacks.contains(35)); // d5
    assert!(attacks.contains(37)); // f5

    // White pawn on a2 attacks only b3
    let attacks = pawn_attacks(8, Color::White);
    assert_eq!(attacks, Bitboard::from_square(17));

    // Black pawn on a7 attacks only b6
    let attacks = pawn_attacks(48, Color::Black);
    assert_eq!(attacks, Bitboard::from_square(41));

    // Black pawn on d4 attacks c3 and e3
    let attacks = pawn_attacks(27, Color::Black);
    assert!(attacks.contains(18));
    assert!(attacks.contains(20));
}

#[test]
fn test_rays_from_corner() {
    assert_eq!(RAYS[0][0].popcount(), 7); // a1 north
    assert_eq!(RAYS[1][0], Bitboard(0x8040201008040200)); // a1 north-east
    assert_eq!(RAYS[4][0], Bitboard::EMPTY); // a1 south
    assert_eq!(RAYS[7][7].popcount(), 7); // h1 north-west
}

#[test]
fn test_rook_attacks_empty_board() {
    let attacks = rook_attacks(28, Bitboard::EMPTY);
    assert_eq!(attacks.popcount(), 14);
}

#[test]
fn test_bishop_attacks_empty_board() {
    let attacks = bishop_attacks(28, Bitboard::EMPTY);
    assert_eq!(attacks.popcount(), 13);
}

#[test]
fn test_rook_attacks_with_blockers() {
    // Rook on a1, blocker on a4
    let occupied = Bitboard::from_square(24);
    let attacks = rook_attacks(0, occupied);
    assert!(attacks.contains(8)); // a2
    assert!(attacks.contains(16)); // a3
    assert!(attacks.contains(24)); // a4 (blocker included)
    assert!(!attacks.contains(32)); // a5 (behind blocker)
    assert!(attacks.contains(1)); // b1
    assert!(attacks.contains(7)); // h1
}

#[test]
fn test_bishop_attacks_with_blockers_below() {
    // Bishop on e4, blockers on c2 and g2
    let occupied = Bitboard::from_square(10) | Bitboard::from_square(14);
    let attacks = bishop_attacks(28, occupied);
    assert!(attacks.contains(19)); // d3
    assert!(attacks.contains(10)); // c2
    assert!(!attacks.contains(1)); // b1
    assert!(attacks.contains(21)); // f3
    assert!(attacks.contains(14)); // g2
    assert!(!attacks.contains(7)); // h1
}

#[test]
fn test_piece_attacks_dispatch() {
    let occ = Bitboard::EMPTY;
    assert_eq!(
        piece_attacks(PieceKind::Queen, 28, Color::White, occ),
        queen_attacks(28, occ)
    );
    assert_eq!(queen_attacks(28, occ).popcount(), 27);
    assert_eq!(
        piece_attacks(PieceKind::Pawn, 28, Color::Black, occ),
        pawn_attacks(28, Color::Black)
    );
    assert_eq!(
        piece_attacks(PieceKind::Knight, 28, Color::Black, occ),
        knight_attacks(28)
    );
}
