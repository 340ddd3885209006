//! Static evaluation, kept up to date move by move.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Scores are in centipawns from white's point of view: positive favors white, negative favors
//! black.
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::cmp::min;
use std::fmt;
use std::ops;
use chess::{Color, Move, Piece, Position, Square};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Score
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(i32);

impl Score {
    /// The score of checkmate on the board
    pub const MATE: Score = Score(30_000);

    /// Returns the score for a draw
    pub fn draw() -> Self {
        Score(0)
    }

    /// Returns the score for `loser` being checkmated `ply` plies from the root
    ///
    /// Mates closer to the root are worth more to the winning side.
    pub fn mated(loser: Color, ply: usize) -> Self {
        let val = Score::MATE.0 - ply as i32;
        match loser {
            Color::White => Score(-val),
            Color::Black => Score(val),
        }
    }

    /// Returns `true` if the score is a forced checkmate for either side
    pub fn is_mate(self) -> bool {
        self.0.abs() > Score::MATE.0 - 1000
    }
}

impl ops::Neg for Score {
    type Output = Score;

    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl ops::Add<i32> for Score {
    type Output = Score;

    fn add(self, rhs: i32) -> Self {
        Score(self.0 + rhs)
    }
}

impl ops::Sub<i32> for Score {
    type Output = Score;

    fn sub(self, rhs: i32) -> Self {
        Score(self.0 - rhs)
    }
}

impl From<i32> for Score {
    fn from(val: i32) -> Self {
        Score(val)
    }
}

impl From<Score> for i32 {
    fn from(val: Score) -> Self {
        val.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

const PIECE_VAL: [i32; Piece::COUNT] = [ 100, 320, 330, 500, 1000, 0 ];

/// Non-pawn material of both sides in the starting position
const OPENING_PHASE: i32 = 2 * (2*320 + 2*330 + 2*500 + 1000);

const KNIGHT_PAWN_ADJ: i32 = 6;
const BISHOP_PAWN_ADJ: i32 = 3;
const BISHOP_PAIR_MID: i32 = 30;
const BISHOP_PAIR_END: i32 = 50;

/// Returns the value of a piece.
pub fn piece_val(piece: Piece) -> i32 {
    PIECE_VAL[piece as usize]
}

// Piece-square tables are laid out as white sees the board: a8 first, h1 last.

const PAWN_MID: [i32; Square::COUNT] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  15,  20,  30,  30,  20,  15,  10,
      5,   8,  10,  25,  25,  10,   8,   5,
      0,  -2,   4,  18,  18,   0,  -2,   0,
      4,  -4,  -6,   4,   4,  -8,  -4,   4,
      5,  10,  10, -20, -25,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

const PAWN_END: [i32; Square::COUNT] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     90,  90,  90,  90,  90,  90,  90,  90,
     50,  50,  50,  50,  50,  50,  50,  50,
     30,  30,  30,  30,  30,  30,  30,  30,
     15,  15,  15,  15,  15,  15,  15,  15,
      5,   5,   5,   5,   5,   5,   5,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
];

const KNIGHT: [i32; Square::COUNT] = [
    -40, -30, -20, -20, -20, -20, -30, -40,
    -30, -10,   0,   0,   0,   0, -10, -30,
    -20,   5,  12,  15,  15,  12,   5, -20,
    -20,   5,  15,  25,  25,  15,   5, -20,
    -20,   5,  15,  20,  20,  15,   5, -20,
    -20,   5,  10,  12,  12,  10,   5, -20,
    -30, -10,   0,   5,   5,   0, -10, -30,
    -40, -30, -20, -20, -20, -20, -30, -40,
];

const BISHOP: [i32; Square::COUNT] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   2,   2,   0,   0, -10,
    -10,   0,   5,   8,   8,   5,   0, -10,
    -10,   5,   8,  12,  12,   8,   5, -10,
    -10,   5,  12,  10,  10,  12,   5, -10,
    -10,  12,  10,   5,   5,  10,  12, -10,
     -8,  10,   0,   0,   0,   0,  10,  -8,
    -20, -10, -30, -10, -10, -30, -10, -20,
];

const ROOK: [i32; Square::COUNT] = [
     10,  10,  15,  20,  20,  15,  10,  10,
     20,  30,  40,  45,  45,  40,  30,  20,
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   5,   5,   0,   0,  -5,
     -5,   0,   0,   5,   5,   0,   0,  -5,
     -5,   0,   0,   5,   5,   0,   0,  -5,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -15, -10,  10,  20,  20,  10, -10, -15,
];

const QUEEN: [i32; Square::COUNT] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

const KING_MID: [i32; Square::COUNT] = [
    -70, -70, -70, -70, -70, -70, -70, -70,
    -60, -60, -60, -60, -60, -60, -60, -60,
    -50, -50, -50, -50, -50, -50, -50, -50,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -30, -30, -30, -30, -30, -30, -30, -30,
    -15, -20, -20, -20, -20, -20, -20, -15,
     10,  10,   0, -10, -10,   0,  10,  10,
     20,  30,  10,   0,   0,  10,  35,  20,
];

const KING_END: [i32; Square::COUNT] = [
    -50, -40, -30, -20, -20, -30, -40, -50,
    -40, -30, -20, -10, -10, -20, -30, -40,
    -30, -20,  20,  30,  30,  20, -20, -30,
    -20, -10,  30,  45,  45,  30, -10, -20,
    -20, -10,  30,  45,  45,  30, -10, -20,
    -30, -20,  20,  30,  30,  20, -20, -30,
    -40, -30, -20, -10, -10, -20, -30, -40,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

const MID_TABLES: [&[i32; Square::COUNT]; Piece::COUNT] =
    [ &PAWN_MID, &KNIGHT, &BISHOP, &ROOK, &QUEEN, &KING_MID ];
const END_TABLES: [&[i32; Square::COUNT]; Piece::COUNT] =
    [ &PAWN_END, &KNIGHT, &BISHOP, &ROOK, &QUEEN, &KING_END ];

/// Index into a piece-square table for a piece of color `c` on `sq`
fn table_index(c: Color, sq: Square) -> usize {
    match c {
        Color::White => sq.flip_rank() as usize,
        Color::Black => sq as usize,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The material and positional terms of a position, updated as moves are made and undone.
///
/// [`update`](#method.update) and [`undo`](#method.undo) only touch the pieces a move touches,
/// and are exact inverses of one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    material: i32,
    mid: i32,
    end: i32,
    phase: i32,
    counts: [[i32; Piece::COUNT]; Color::COUNT],
}

impl Evaluation {
    /// Evaluates `pos` from scratch.
    pub fn new(pos: &Position) -> Evaluation {
        let mut eval = Evaluation {
            material: 0,
            mid: 0,
            end: 0,
            phase: 0,
            counts: [[0; Piece::COUNT]; Color::COUNT],
        };

        for &c in Color::ALL.iter() {
            for &p in Piece::ALL.iter() {
                for sq in pos.occupied_by_piece(c, p) {
                    eval.place(c, p, sq, 1);
                }
            }
        }

        eval
    }

    /// Accounts for `mv` having been made.
    pub fn update(&mut self, mv: &Move) {
        self.apply(mv, 1);
    }

    /// Reverts [`update`](#method.update) for `mv`.
    pub fn undo(&mut self, mv: &Move) {
        self.apply(mv, -1);
    }

    /// Returns the material balance.
    pub fn material(&self) -> i32 {
        self.material
    }

    /// Returns the non-pawn material left on the board, which measures how far the game has
    /// progressed. It starts out at its maximum and approaches zero in the endgame.
    pub fn phase(&self) -> i32 {
        self.phase
    }

    /// Returns the static score.
    pub fn evaluate(&self) -> Score {
        let phase = min(self.phase, OPENING_PHASE);
        let mut val = self.material + blend(self.mid, self.end, phase);

        for &c in Color::ALL.iter() {
            let counts = &self.counts[c as usize];
            let pawns = counts[Piece::Pawn as usize];
            let knights = counts[Piece::Knight as usize];
            let bishops = counts[Piece::Bishop as usize];

            // knights like closed positions and bishops like open ones
            let mut adj = knights * (pawns - 5) * KNIGHT_PAWN_ADJ;
            adj -= bishops * (pawns - 5) * BISHOP_PAWN_ADJ;

            if bishops >= 2 {
                adj += blend(BISHOP_PAIR_MID, BISHOP_PAIR_END, phase);
            }

            val += sign(c) * adj;
        }

        Score(val)
    }

    fn apply(&mut self, mv: &Move, dir: i32) {
        let us = mv.color();

        self.place(us, mv.piece(), mv.origin(), -dir);
        self.place(us, mv.promotion().unwrap_or_else(|| mv.piece()), mv.destination(), dir);

        if let (Some(capt_pc), Some(capt_sq)) = (mv.captured_piece(), mv.capture_square()) {
            self.place(!us, capt_pc, capt_sq, -dir);
        }

        if let Some((orig, dest)) = mv.castling_rook_squares() {
            self.place(us, Piece::Rook, orig, -dir);
            self.place(us, Piece::Rook, dest, dir);
        }
    }

    /// Adds (`dir` = 1) or removes (`dir` = -1) a piece
    fn place(&mut self, c: Color, p: Piece, sq: Square, dir: i32) {
        let i = table_index(c, sq);
        let s = sign(c) * dir;

        self.material += s * PIECE_VAL[p as usize];
        self.mid += s * MID_TABLES[p as usize][i];
        self.end += s * END_TABLES[p as usize][i];
        self.counts[c as usize][p as usize] += dir;

        if p != Piece::Pawn {
            self.phase += dir * PIECE_VAL[p as usize];
        }
    }
}

fn sign(c: Color) -> i32 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Interpolates between a middlegame and an endgame value
fn blend(mid: i32, end: i32, phase: i32) -> i32 {
    (mid * phase + end * (OPENING_PHASE - phase)) / OPENING_PHASE
}

#[cfg(test)]
mod tests {
    use chess::movegen::legal_moves;
    use super::*;

    fn eval(fen: &str) -> Evaluation {
        Evaluation::new(&Position::from_fen_str(fen).expect("valid fen"))
    }

    #[test]
    fn starting_position_is_balanced() {
        let eval = Evaluation::new(&Position::new());
        assert_eq!(eval.evaluate(), Score::draw());
        assert_eq!(eval.material(), 0);
        assert_eq!(eval.phase(), OPENING_PHASE);
    }

    #[test]
    fn scores_are_from_whites_side() {
        let white_queen = eval("k7/8/8/8/8/8/8/KQ6 w - - 0 1");
        let black_queen = eval("kq6/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(white_queen.material(), 1000);
        assert!(white_queen.evaluate() > Score::from(900));
        assert_eq!(white_queen.evaluate(), -black_queen.evaluate());

        // side to move does not matter
        assert_eq!(eval("k7/8/8/8/8/8/8/KQ6 b - - 0 1"), white_queen);
    }

    #[test]
    fn mirrored_positions_negate() {
        assert_eq!(
            eval("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").evaluate(),
            -eval("rnbqkb1r/pppp1ppp/5n2/4p3/4P3/2N5/PPPP1PPP/R1BQKBNR b KQkq - 2 3").evaluate(),
        );
    }

    #[test]
    fn bishop_pair_is_rewarded() {
        let pair = eval("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
        let knight = eval("4k3/8/8/8/8/8/8/2B1KN2 w - - 0 1");
        let pair_only = pair.evaluate() - pair.material();
        let knight_only = knight.evaluate() - knight.material();
        // bishops gain from the missing pawns as well
        assert!(i32::from(pair_only) - i32::from(knight_only) > BISHOP_PAIR_MID);
    }

    #[test]
    fn knights_prefer_pawns() {
        let closed = eval("4k3/pppp4/8/8/8/8/PPPPPPPP/4KN2 w - - 0 1");
        let open = eval("4k3/pppp4/8/8/8/8/PPPP4/4KN2 w - - 0 1");
        let closed = i32::from(closed.evaluate()) - closed.material();
        let open = i32::from(open.evaluate()) - open.material();
        assert!(closed > open);
    }

    #[test]
    fn update_matches_a_fresh_evaluation() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
        ];

        for fen in fens.iter() {
            let mut pos = Position::from_fen_str(fen).expect("valid fen");
            let mut eval = Evaluation::new(&pos);
            let original = eval.clone();

            for mv in legal_moves(&pos) {
                pos.make_move(&mv).expect("legal move");
                eval.update(&mv);
                assert_eq!(eval, Evaluation::new(&pos), "{} {}", fen, mv);

                pos.undo_move(&mv);
                eval.undo(&mv);
                assert_eq!(eval, original, "{} {}", fen, mv);
            }
        }
    }

    #[test]
    fn mate_scores_favor_quick_mates() {
        assert!(Score::mated(Color::Black, 1) > Score::mated(Color::Black, 3));
        assert!(Score::mated(Color::White, 1) < Score::mated(Color::White, 3));
        assert_eq!(Score::mated(Color::White, 2), -Score::mated(Color::Black, 2));
        assert!(Score::mated(Color::White, 5).is_mate());
        assert!(!Score::from(2500).is_mate());
    }
}
