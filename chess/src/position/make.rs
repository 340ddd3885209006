//! Applies and reverts moves on a `Position`
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Castling rights kept when a piece moves from or to each square
const CASTLING_MASK: [u8; Square::COUNT] = {
    let mut masks = [CASTLE_ALL; Square::COUNT];
    masks[Square::A1 as usize] = CASTLE_ALL & !CASTLE_WHITE_QUEEN_SIDE;
    masks[Square::E1 as usize] = CASTLE_ALL & !(CASTLE_WHITE_KING_SIDE | CASTLE_WHITE_QUEEN_SIDE);
    masks[Square::H1 as usize] = CASTLE_ALL & !CASTLE_WHITE_KING_SIDE;
    masks[Square::A8 as usize] = CASTLE_ALL & !CASTLE_BLACK_QUEEN_SIDE;
    masks[Square::E8 as usize] = CASTLE_ALL & !(CASTLE_BLACK_KING_SIDE | CASTLE_BLACK_QUEEN_SIDE);
    masks[Square::H8 as usize] = CASTLE_ALL & !CASTLE_BLACK_KING_SIDE;
    masks
};

impl Position {
    /// Makes the move.
    ///
    /// `mv` must have been generated from this position, for instance by
    /// [`pseudo_legal_moves`](movegen/fn.pseudo_legal_moves.html). If the move leaves the mover's
    /// own king attacked, every change is rolled back and `Err(Error::KingCapturable)` is
    /// returned. Castling through an attacked square is not detected here; the move generator
    /// only produces castling moves which pass [`can_castle`](#method.can_castle).
    pub fn make_move(&mut self, mv: &Move) -> Result<()> {
        let us = mv.color();

        // pieces, including the captured piece and the castling rook
        self.toggle_pieces(mv);

        // castling rights only ever shrink
        self.zobrist.toggle_castling_rights(self.castling_rights);
        self.castling_rights &=
            CASTLING_MASK[mv.origin() as usize] & CASTLING_MASK[mv.destination() as usize];
        self.zobrist.toggle_castling_rights(self.castling_rights);

        // en passant square
        if let Some(ep_sq) = self.ep_square {
            self.zobrist.toggle_ep_square(ep_sq);
        }
        self.ep_square = match mv.kind() {
            MoveKind::DoublePawnPush => {
                Some(Square::from_coord(mv.origin().file(), Rank::R3.relative_to(us)))
            },
            _ => None,
        };
        if let Some(ep_sq) = self.ep_square {
            self.zobrist.toggle_ep_square(ep_sq);
        }

        // update move counters
        if mv.is_capture() || mv.piece() == Pawn {
            self.draw_plies = 0;
        } else {
            self.draw_plies += 1;
        }
        if us == Black {
            self.move_num += 1;
        }

        // switch turns
        self.turn = !us;
        self.zobrist.toggle_turn();

        if self.is_check(us) {
            // own king is under attack
            self.undo_move(mv);
            return Err(Error::KingCapturable);
        }

        Ok(())
    }

    /// Reverts `mv`, which must be the last move made on this position.
    pub fn undo_move(&mut self, mv: &Move) {
        let us = mv.color();

        // switch turns back
        self.turn = us;
        self.zobrist.toggle_turn();

        // restore move counters
        if us == Black {
            self.move_num -= 1;
        }
        self.draw_plies = mv.prev_half_move_clock();

        // restore en passant square
        if let Some(ep_sq) = self.ep_square {
            self.zobrist.toggle_ep_square(ep_sq);
        }
        self.ep_square = mv.prev_en_passant_square();
        if let Some(ep_sq) = self.ep_square {
            self.zobrist.toggle_ep_square(ep_sq);
        }

        // restore castling rights
        self.zobrist.toggle_castling_rights(self.castling_rights);
        self.castling_rights = mv.prev_castling_rights();
        self.zobrist.toggle_castling_rights(self.castling_rights);

        // put the pieces back
        self.toggle_pieces(mv);
    }

    /// Toggles every piece `mv` touches, which both makes and unmakes the piece movement.
    fn toggle_pieces(&mut self, mv: &Move) {
        let us = mv.color();

        self.toggle_piece(us, mv.piece(), mv.origin());
        self.toggle_piece(us, mv.promotion().unwrap_or_else(|| mv.piece()), mv.destination());

        if let (Some(capt_pc), Some(capt_sq)) = (mv.captured_piece(), mv.capture_square()) {
            self.toggle_piece(!us, capt_pc, capt_sq);
        }

        if let Some((orig, dest)) = mv.castling_rook_squares() {
            self.toggle_piece(us, Rook, orig);
            self.toggle_piece(us, Rook, dest);
        }

        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::pseudo_legal_moves;

    const FENS: [&str; 6] = [
        STARTING_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    ];

    /// Makes and undoes every pseudo-legal move two plies deep, checking the position is restored
    /// exactly and the incremental hash always matches one computed from scratch.
    #[test]
    fn undo_restores_the_position() {
        for fen in FENS.iter() {
            let mut pos = Position::from_fen_str(fen).expect("valid fen");
            let original = pos.clone();

            for mv in pseudo_legal_moves(&pos) {
                let before = pos.clone();
                if pos.make_move(&mv).is_err() {
                    assert_eq!(pos, before, "rejected {} left changes in {}", mv, fen);
                    continue;
                }
                assert_eq!(pos.zobrist_key(), pos.calc_zobrist(), "{} {}", fen, mv);

                for reply in pseudo_legal_moves(&pos) {
                    let mid = pos.clone();
                    if pos.make_move(&reply).is_ok() {
                        assert_eq!(pos.zobrist_key(), pos.calc_zobrist());
                        pos.undo_move(&reply);
                    }
                    assert_eq!(pos, mid);
                }

                pos.undo_move(&mv);
                assert_eq!(pos, before, "{} {}", fen, mv);
            }

            assert_eq!(pos, original);
        }
    }

    #[test]
    fn en_passant_lives_for_one_ply() {
        let mut pos = Position::from_fen_str("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1")
            .expect("valid fen");

        let push = pos.find_move("e2e4").expect("legal move");
        pos.make_move(&push).expect("legal move");
        assert_eq!(pos.en_passant_square(), Some(Square::E3));

        // the capture is available right away
        let ep = pos.find_move("f4e3").expect("legal move");
        assert_eq!(ep.kind(), MoveKind::EnPassant);
        pos.make_move(&ep).expect("legal move");
        assert!(pos.occupied_by_piece(White, Pawn).is_empty());
        assert_eq!(pos.piece_at(Square::E3), Some((Black, Pawn)));
        assert_eq!(pos.en_passant_square(), None);
        pos.undo_move(&ep);
        assert_eq!(pos.piece_at(Square::E4), Some((White, Pawn)));

        // any other move clears the target
        let wait = pos.find_move("e8d8").expect("legal move");
        pos.make_move(&wait).expect("legal move");
        assert_eq!(pos.en_passant_square(), None);
        pos.undo_move(&wait);
        assert_eq!(pos.en_passant_square(), Some(Square::E3));

        pos.undo_move(&push);
        assert_eq!(pos.en_passant_square(), None);
        assert_eq!(pos, Position::from_fen_str("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1")
            .expect("valid fen"));
    }

    #[test]
    fn castling_rights_only_come_back_on_undo() {
        let mut pos = Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("valid fen");

        let rook_move = pos.find_move("h1h4").expect("legal move");
        pos.make_move(&rook_move).expect("legal move");
        assert!(!pos.has_castling_right(White, CastlingSide::KingSide));
        assert!(pos.has_castling_right(White, CastlingSide::QueenSide));

        let reply = pos.find_move("e8d8").expect("legal move");
        pos.make_move(&reply).expect("legal move");
        assert_eq!(pos.castling_rights(), CASTLE_WHITE_QUEEN_SIDE);

        // moving the rook home does not restore the right
        let back = pos.find_move("h4h1").expect("legal move");
        pos.make_move(&back).expect("legal move");
        assert_eq!(pos.castling_rights(), CASTLE_WHITE_QUEEN_SIDE);

        pos.undo_move(&back);
        pos.undo_move(&reply);
        assert_eq!(pos.castling_rights(), CASTLE_ALL & !CASTLE_WHITE_KING_SIDE);
        pos.undo_move(&rook_move);
        assert_eq!(pos.castling_rights(), CASTLE_ALL);
    }

    #[test]
    fn capturing_a_home_rook_clears_its_right() {
        let mut pos = Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("valid fen");
        let capture = pos.find_move("a1a8").expect("legal move");
        pos.make_move(&capture).expect("legal move");
        assert_eq!(pos.castling_rights(), CASTLE_WHITE_KING_SIDE | CASTLE_BLACK_KING_SIDE);
        assert_eq!(pos.to_fen_str(), "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
    }

    #[test]
    fn castling_moves_the_rook() {
        let mut pos = Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 5 10")
            .expect("valid fen");
        let castle = pos.find_move("e1c1").expect("legal move");
        pos.make_move(&castle).expect("legal move");
        assert_eq!(pos.to_fen_str(), "r3k2r/8/8/8/8/8/8/2KR3R b kq - 6 10");

        let reply = pos.find_move("e8g8").expect("legal move");
        pos.make_move(&reply).expect("legal move");
        assert_eq!(pos.to_fen_str(), "r4rk1/8/8/8/8/8/8/2KR3R w - - 7 11");
        assert_eq!(pos.zobrist_key(), pos.calc_zobrist());
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let mut pos = Position::from_fen_str("1r2k3/P7/8/8/8/8/8/4K3 w - - 3 40")
            .expect("valid fen");
        let promote = pos.find_move("a7b8q").expect("legal move");
        pos.make_move(&promote).expect("legal move");
        assert_eq!(pos.to_fen_str(), "1Q2k3/8/8/8/8/8/8/4K3 b - - 0 40");
        assert!(pos.in_check());

        pos.undo_move(&promote);
        assert_eq!(pos.to_fen_str(), "1r2k3/P7/8/8/8/8/8/4K3 w - - 3 40");
    }

    #[test]
    fn moving_into_check_is_rejected() {
        let mut pos = Position::from_fen_str("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").expect("valid fen");
        let before = pos.clone();
        let illegal = pseudo_legal_moves(&pos).into_iter()
            .find(|mv| mv.destination() == Square::F2)
            .expect("pseudo-legal move");
        assert_eq!(pos.make_move(&illegal), Err(Error::KingCapturable));
        assert_eq!(pos, before);
    }
}
