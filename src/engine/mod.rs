//! The engine
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use log::{debug, info};
use chess::{Color, Move, Position};
use chess::movegen::pseudo_legal_moves;

mod eval;
pub use eval::{Evaluation, Score, piece_val};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The state of the game at the root of a search
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// The side to move has at least one legal move
    Ongoing,
    /// The side to move is checkmated
    Checkmate,
    /// The side to move has no legal move but is not in check
    Stalemate,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ongoing => "ongoing".fmt(f),
            Status::Checkmate => "checkmate".fmt(f),
            Status::Stalemate => "stalemate".fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The outcome of [`Search::minimax_root`](struct.Search.html#method.minimax_root)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    best_move: Option<Move>,
    score: Score,
    nodes: u64,
    status: Status,
}

impl SearchResult {
    /// Returns the best move found, or `None` if there are no legal moves.
    pub fn best_move(&self) -> Option<&Move> {
        self.best_move.as_ref()
    }

    /// Returns the score of the best move, from white's point of view.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Returns the number of positions visited.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns whether the root position is checkmate, stalemate, or neither.
    pub fn status(&self) -> Status {
        self.status
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A fixed-depth, full-width minimax search.
///
/// The search owns its position and evaluation, and leaves both as it found them after every
/// call. White maximizes the score and black minimizes it.
///
/// ```rust
/// use kestrel::chess::Position;
/// use kestrel::engine::Search;
///
/// let pos: Position = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse()?;
/// let result = Search::new(pos).minimax_root(2);
/// assert_eq!(result.best_move().map(|mv| mv.to_string()), Some("a1a8".to_string()));
/// assert!(result.score().is_mate());
/// # Ok::<(), kestrel::chess::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Search {
    pos: Position,
    eval: Evaluation,
    nodes: u64,
}

impl Search {
    /// Creates a new search of `pos`.
    pub fn new(pos: Position) -> Self {
        let eval = Evaluation::new(&pos);
        Search { pos, eval, nodes: 0 }
    }

    /// Returns the position being searched.
    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Returns the evaluation of the position being searched.
    pub fn evaluation(&self) -> &Evaluation {
        &self.eval
    }

    /// Searches every move `depth` plies deep and returns the best one with its score.
    ///
    /// Each root move is searched `depth - 1` further plies, so a depth of zero behaves like a
    /// depth of one. Ties go to the move generated first.
    pub fn minimax_root(&mut self, depth: usize) -> SearchResult {
        let us = self.pos.turn();
        let mut best: Option<(Move, Score)> = None;
        self.nodes = 1;

        info!("searching {} to depth {}", self.pos, depth);

        for mv in pseudo_legal_moves(&self.pos) {
            if let Some(score) = self.try_move(&mv, 1, depth.saturating_sub(1)) {
                debug!("{}: {}", mv, score);

                let better = match best {
                    None => true,
                    Some((_, best_score)) => improves(us, score, best_score),
                };
                if better {
                    best = Some((mv, score));
                }
            }
        }

        let result = match best {
            Some((mv, score)) => SearchResult {
                best_move: Some(mv),
                score,
                nodes: self.nodes,
                status: Status::Ongoing,
            },
            None => {
                let (score, status) = self.terminal(0);
                SearchResult { best_move: None, score, nodes: self.nodes, status }
            },
        };

        match result.best_move {
            Some(mv) => info!("best move {} score {} nodes {}", mv, result.score, result.nodes),
            None => info!("no legal moves: {} score {}", result.status, result.score),
        }

        result
    }

    /// Returns the minimax score of the current position searched `depth` plies deep, `ply`
    /// plies from the root.
    pub fn minimax(&mut self, ply: usize, depth: usize) -> Score {
        if depth == 0 {
            return self.eval.evaluate();
        }

        let us = self.pos.turn();
        let mut best: Option<Score> = None;

        for mv in pseudo_legal_moves(&self.pos) {
            if let Some(score) = self.try_move(&mv, ply + 1, depth - 1) {
                best = match best {
                    Some(best_score) if !improves(us, score, best_score) => Some(best_score),
                    _ => Some(score),
                };
            }
        }

        match best {
            Some(score) => score,
            None => self.terminal(ply).0,
        }
    }

    /// Makes `mv`, searches the resulting position and takes the move back. Returns `None` if
    /// the move was rejected.
    fn try_move(&mut self, mv: &Move, ply: usize, depth: usize) -> Option<Score> {
        self.pos.make_move(mv).ok()?;
        self.eval.update(mv);
        self.nodes += 1;

        let score = self.minimax(ply, depth);

        self.eval.undo(mv);
        self.pos.undo_move(mv);
        Some(score)
    }

    /// Scores a position with no legal moves
    fn terminal(&self, ply: usize) -> (Score, Status) {
        if self.pos.in_check() {
            (Score::mated(self.pos.turn(), ply), Status::Checkmate)
        } else {
            (Score::draw(), Status::Stalemate)
        }
    }
}

/// Returns `true` if `score` is better than `best` for `c`
fn improves(c: Color, score: Score, best: Score) -> bool {
    match c {
        Color::White => score > best,
        Color::Black => score < best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(fen: &str) -> Search {
        Search::new(Position::from_fen_str(fen).expect("valid fen"))
    }

    #[test]
    fn white_finds_mate_in_one() {
        let mut search = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let result = search.minimax_root(2);
        assert_eq!(result.best_move().map(|mv| mv.to_string()), Some("a1a8".to_string()));
        assert_eq!(result.score(), Score::mated(Color::Black, 1));
        assert_eq!(result.status(), Status::Ongoing);
    }

    #[test]
    fn black_finds_mate_in_one() {
        let mut search = search("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1");
        let result = search.minimax_root(2);
        assert_eq!(result.best_move().map(|mv| mv.to_string()), Some("a8a1".to_string()));
        assert_eq!(result.score(), Score::mated(Color::White, 1));
    }

    #[test]
    fn checkmated_root() {
        let mut search = search("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        let result = search.minimax_root(3);
        assert_eq!(result.best_move(), None);
        assert_eq!(result.status(), Status::Checkmate);
        assert_eq!(result.score(), Score::mated(Color::Black, 0));
        assert_eq!(result.nodes(), 1);
    }

    #[test]
    fn stalemated_root() {
        let mut search = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let result = search.minimax_root(2);
        assert_eq!(result.best_move(), None);
        assert_eq!(result.status(), Status::Stalemate);
        assert_eq!(result.score(), Score::draw());
    }

    #[test]
    fn stalemate_scores_as_a_draw() {
        // Qf7 stalemates and Qf8 mates
        let mut search = search("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
        let mut pos = search.position().clone();
        let stalemate = pos.find_move("f1f7").expect("legal move");
        pos.make_move(&stalemate).expect("legal move");
        assert_eq!(Search::new(pos).minimax(1, 1), Score::draw());

        let result = search.minimax_root(2);
        assert_eq!(result.best_move().map(|mv| mv.to_string()), Some("f1f8".to_string()));
    }

    #[test]
    fn search_restores_the_position() {
        let mut search =
            search("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let pos = search.position().clone();
        let eval = search.evaluation().clone();
        search.minimax_root(2);
        assert_eq!(search.position(), &pos);
        assert_eq!(search.evaluation(), &eval);
    }

    #[test]
    fn counts_nodes() {
        let mut search = Search::new(Position::new());
        assert_eq!(search.minimax_root(1).nodes(), 21);
        assert_eq!(search.minimax_root(2).nodes(), 421);
    }

    #[test]
    fn depth_one_picks_material() {
        let mut search = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let result = search.minimax_root(1);
        assert_eq!(result.best_move().map(|mv| mv.to_string()), Some("d1d5".to_string()));
    }
}
