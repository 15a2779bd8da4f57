use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal move sequences of exactly `depth` plies from `pos`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, &mut layers[..])
}

/// Perft split by root move, in generation order.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut root = Vec::with_capacity(64);
    legal_moves_into(pos, &mut root);

    let mut layers = vec![Vec::with_capacity(64); depth as usize - 1];
    root.into_iter()
        .map(|mv| {
            let mut child = pos.clone();
            child.apply_move(mv);
            (mv, count(&child, &mut layers[..]))
        })
        .collect()
}

// One move buffer per remaining ply, so the depth is the number of layers.
fn count(pos: &Position, layers: &mut [Vec<Move>]) -> u64 {
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };

    legal_moves_into(pos, buf);
    if rest.is_empty() {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for &mv in buf.iter() {
        let mut child = pos.clone();
        child.apply_move(mv);
        nodes += count(&child, rest);
    }
    nodes
}

#[cfg(test)]
#[path = "perft_tests.rs"]
mod perft_tests;
