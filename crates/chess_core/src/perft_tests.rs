use super::*;

#[test]
fn test_depth_zero_is_one_node() {
    let pos = Position::startpos();
    assert_eq!(perft(&pos, 0), 1);
    assert!(divide(&pos, 0).is_empty());
}

#[test]
fn test_startpos_shallow() {
    let pos = Position::startpos();
    assert_eq!(perft(&pos, 1), 20);
    assert_eq!(perft(&pos, 2), 400);
}

#[test]
fn test_divide_sums_to_perft() {
    let pos = Position::startpos();
    let split = divide(&pos, 3);
    assert_eq!(split.len(), 20);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);

    let e2e4 = split
        .iter()
        .find(|(mv, _)| *mv == Move::from_uci("e2e4"))
        .map(|&(_, n)| n);
    assert_eq!(e2e4, Some(600));
}

#[test]
fn test_perft_leaves_position_untouched() {
    let pos = Position::startpos();
    let before = pos.clone();
    perft(&pos, 3);
    assert_eq!(pos, before);
}
