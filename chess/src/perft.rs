//! Counts the variations reachable from a position, for verifying move generation
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! The counts can be compared against published reference values. Every statistic other than
//! `nodes` describes the moves made on the last ply only.
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use log::info;
use super::*;
use movegen::pseudo_legal_moves;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Totals gathered by [`perft`](fn.perft.html)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PerftStats {
    /// Positions reached at the requested depth
    pub nodes: u64,
    /// Captures made on the last ply, en passant included
    pub captures: u64,
    /// En passant captures made on the last ply
    pub en_passants: u64,
    /// Castling moves made on the last ply
    pub castles: u64,
    /// Promotions made on the last ply
    pub promotions: u64,
    /// Moves on the last ply which give check
    pub checks: u64,
}

impl PerftStats {
    fn leaf(pos: &Position, mv: &Move) -> PerftStats {
        PerftStats {
            nodes: 1,
            captures: mv.is_capture() as u64,
            en_passants: mv.is_en_passant() as u64,
            castles: mv.is_castle() as u64,
            promotions: mv.is_promotion() as u64,
            checks: pos.in_check() as u64,
        }
    }
}

impl ops::AddAssign for PerftStats {
    fn add_assign(&mut self, other: PerftStats) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passants += other.en_passants;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
    }
}

/// Walks every legal variation `depth` plies deep from `pos`.
///
/// `pos` is restored before returning. A depth of zero counts the position itself.
///
/// ```rust
/// use chess::Position;
/// use chess::perft::perft;
///
/// let mut pos = Position::new();
/// let stats = perft(&mut pos, 2);
/// assert_eq!(stats.nodes, 400);
/// assert_eq!(stats.captures, 0);
/// assert_eq!(pos, Position::new());
/// ```
pub fn perft(pos: &mut Position, depth: usize) -> PerftStats {
    let stats = count(pos, depth);
    info!("perft depth {}: {} nodes, {} captures, {} en passant, {} castles, {} promotions, \
           {} checks", depth, stats.nodes, stats.captures, stats.en_passants, stats.castles,
           stats.promotions, stats.checks);
    stats
}

/// Counts the leaf nodes below each legal move of `pos`, `depth` plies deep in total.
///
/// Moves are listed in generation order. A depth of zero yields an empty list.
pub fn divide(pos: &mut Position, depth: usize) -> Vec<(Move, u64)> {
    let mut counts = Vec::new();
    if depth == 0 {
        return counts;
    }

    for mv in pseudo_legal_moves(pos) {
        if pos.make_move(&mv).is_ok() {
            counts.push((mv, count(pos, depth - 1).nodes));
            pos.undo_move(&mv);
        }
    }

    let total: u64 = counts.iter().map(|&(_, n)| n).sum();
    info!("divide depth {}: {} moves, {} nodes", depth, counts.len(), total);
    counts
}

fn count(pos: &mut Position, depth: usize) -> PerftStats {
    let mut stats = PerftStats::default();
    if depth == 0 {
        stats.nodes = 1;
        return stats;
    }

    for mv in pseudo_legal_moves(pos) {
        if pos.make_move(&mv).is_err() {
            continue;
        }

        if depth == 1 {
            stats += PerftStats::leaf(pos, &mv);
        } else {
            stats += count(pos, depth - 1);
        }

        pos.undo_move(&mv);
    }

    stats
}
