//! Generates the moves available in a position
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Moves come out in a fixed order: pawns, knights, king, bishops, rooks, queens and finally
//! castling. Within each group origins ascend, and for each origin destinations ascend. A pawn
//! reaching the last rank yields four moves, promoting to knight, bishop, rook and queen in that
//! order.
//!
//! [`pseudo_legal_moves`](fn.pseudo_legal_moves.html) obeys how pieces move but may leave the
//! mover's king attacked; [`Position::make_move`](../struct.Position.html#method.make_move) rejects
//! those. [`legal_moves`](fn.legal_moves.html) filters them out up front.
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;
use bitboard::tables;
use Piece::*;

/// Generates the pseudo-legal moves for the side to move.
///
/// ```rust
/// use chess::Position;
/// use chess::movegen::pseudo_legal_moves;
///
/// let moves = pseudo_legal_moves(&Position::new());
/// assert_eq!(moves.len(), 20);
/// assert_eq!(moves[0].to_string(), "a2a3");
/// ```
pub fn pseudo_legal_moves(pos: &Position) -> MoveList {
    let mut moves = MoveList::with_capacity(64);
    let us = pos.turn();
    let own = pos.occupied_by(us);
    let tables = tables();

    pawn_moves(pos, &mut moves);

    for orig in pos.occupied_by_piece(us, Knight) {
        piece_moves(pos, Knight, orig, tables.knight(orig) & !own, &mut moves);
    }

    for orig in pos.occupied_by_piece(us, King) {
        piece_moves(pos, King, orig, tables.king(orig) & !own, &mut moves);
    }

    for &piece in &[Bishop, Rook, Queen] {
        for orig in pos.occupied_by_piece(us, piece) {
            let attacks = match piece {
                Bishop => tables.bishop(orig, pos.occupied()),
                Rook => tables.rook(orig, pos.occupied()),
                _ => tables.queen(orig, pos.occupied()),
            };
            piece_moves(pos, piece, orig, attacks & !own, &mut moves);
        }
    }

    let home = Rank::R1.relative_to(us);
    for &side in CastlingSide::ALL.iter() {
        if pos.can_castle(us, side) {
            let orig = Square::from_coord(File::E, home);
            let dest = Square::from_coord(side.king_destination_file(), home);
            moves.push(Move::new(pos, King, orig, dest, MoveKind::Castle, None));
        }
    }

    moves
}

/// Generates the legal moves for the side to move.
///
/// Each pseudo-legal move is tried on a copy of `pos` and kept only if it was not rejected.
///
/// ```rust
/// use chess::Position;
/// use chess::movegen::legal_moves;
///
/// // the pinned knight on d2 cannot move
/// let pos: Position = "4k3/8/8/b7/8/8/3N4/4K3 w - - 0 1".parse()?;
/// assert!(legal_moves(&pos).iter().all(|mv| mv.origin() != chess::Square::D2));
/// # Ok::<(), chess::Error>(())
/// ```
pub fn legal_moves(pos: &Position) -> MoveList {
    let mut scratch = pos.clone();

    pseudo_legal_moves(pos).into_iter().filter(|mv| {
        if scratch.make_move(mv).is_ok() {
            scratch.undo_move(mv);
            true
        } else {
            false
        }
    }).collect()
}

fn piece_moves(
    pos: &Position,
    piece: Piece,
    orig: Square,
    targets: Bitboard,
    moves: &mut MoveList,
) {
    let enemy = pos.occupied_by(!pos.turn());

    for dest in targets {
        let kind = if enemy.contains(dest) { MoveKind::Capture } else { MoveKind::Quiet };
        moves.push(Move::new(pos, piece, orig, dest, kind, None));
    }
}

fn pawn_moves(pos: &Position, moves: &mut MoveList) {
    let us = pos.turn();
    let forward = us.forward();
    let enemy = pos.occupied_by(!us);
    let empty = !pos.occupied();
    let start_rank = Rank::R2.relative_to(us);
    let last_rank = Rank::R8.relative_to(us);
    let tables = tables();

    for orig in pos.occupied_by_piece(us, Pawn) {
        let attacks = tables.pawn(us, orig);
        let mut targets = attacks & enemy;

        if let Some(ep_sq) = pos.en_passant_square() {
            if attacks.contains(ep_sq) {
                targets.insert(ep_sq);
            }
        }

        if let Some(one) = orig.offset_rank(forward).filter(|&sq| empty.contains(sq)) {
            targets.insert(one);

            if orig.rank() == start_rank {
                if let Some(two) = one.offset_rank(forward).filter(|&sq| empty.contains(sq)) {
                    targets.insert(two);
                }
            }
        }

        for dest in targets {
            let diagonal = dest.file() != orig.file();
            let capture = diagonal && enemy.contains(dest);

            if dest.rank() == last_rank {
                let kind = if capture { MoveKind::PromotionCapture } else { MoveKind::Promotion };
                for &prom_pc in Piece::PROMOTIONS.iter() {
                    moves.push(Move::new(pos, Pawn, orig, dest, kind, Some(prom_pc)));
                }
                continue;
            }

            let kind = if capture {
                MoveKind::Capture
            } else if diagonal {
                MoveKind::EnPassant
            } else if (dest as i8 - orig as i8).abs() == 16 {
                MoveKind::DoublePawnPush
            } else {
                MoveKind::Quiet
            };
            moves.push(Move::new(pos, Pawn, orig, dest, kind, None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(moves: &[Move]) -> Vec<String> {
        moves.iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn starting_position_order() {
        let moves = pseudo_legal_moves(&Position::new());
        assert_eq!(names(&moves), vec![
            "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4",
            "e2e3", "e2e4", "f2f3", "f2f4", "g2g3", "g2g4", "h2h3", "h2h4",
            "b1a3", "b1c3", "g1f3", "g1h3",
        ]);
        assert_eq!(moves[1].kind(), MoveKind::DoublePawnPush);
        assert_eq!(moves[0].kind(), MoveKind::Quiet);
    }

    #[test]
    fn generation_is_deterministic() {
        let pos = Position::from_fen_str(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        ).expect("valid fen");
        assert_eq!(pseudo_legal_moves(&pos), pseudo_legal_moves(&pos));
        assert_eq!(legal_moves(&pos).len(), 48);
    }

    #[test]
    fn groups_come_in_order() {
        let pos = Position::from_fen_str("4k3/8/8/8/8/8/4P3/RN2K2R w K - 0 1").expect("valid fen");
        let pieces: Vec<Piece> = pseudo_legal_moves(&pos).iter().map(|mv| mv.piece()).collect();
        let mut sorted = pieces.clone();
        // pawns, knights, king, then sliders, then castling (a king move) last
        let castle = sorted.pop();
        sorted.sort_by_key(|&p| match p {
            Pawn => 0, Knight => 1, King => 2, Bishop => 3, Rook => 4, Queen => 5,
        });
        sorted.push(castle.expect("castling move"));
        assert_eq!(pieces, sorted);
        assert_eq!(pseudo_legal_moves(&pos).last().map(|mv| mv.to_string()),
            Some("e1g1".to_string()));
    }

    #[test]
    fn promotions_fan_out() {
        let pos = Position::from_fen_str("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("valid fen");
        let moves = pseudo_legal_moves(&pos);
        let pawn_moves: Vec<_> = moves.iter().filter(|mv| mv.piece() == Pawn).collect();
        assert_eq!(pawn_moves.iter().map(|mv| mv.to_string()).collect::<Vec<_>>(),
            vec!["a7a8n", "a7a8b", "a7a8r", "a7a8q", "a7b8n", "a7b8b", "a7b8r", "a7b8q"]);
        assert_eq!(pawn_moves[0].kind(), MoveKind::Promotion);
        assert_eq!(pawn_moves[4].kind(), MoveKind::PromotionCapture);
        assert_eq!(pawn_moves[4].captured_piece(), Some(Knight));
    }

    #[test]
    fn blocked_pawns_do_not_push() {
        let pos = Position::from_fen_str("4k3/8/8/8/8/p7/P3P3/4K3 w - - 0 1").expect("valid fen");
        let moves = names(&pseudo_legal_moves(&pos));
        assert!(!moves.iter().any(|mv| mv.starts_with("a2")));
        assert!(moves.contains(&"e2e4".to_string()));

        let pos = Position::from_fen_str("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").expect("valid fen");
        let moves = names(&pseudo_legal_moves(&pos));
        assert!(moves.contains(&"e2e3".to_string()));
        assert!(!moves.contains(&"e2e4".to_string()));
    }

    #[test]
    fn black_pawns_move_down() {
        let pos = Position::from_fen_str("4k3/3p4/4P3/8/8/8/8/4K3 b - - 0 1").expect("valid fen");
        let moves = names(&pseudo_legal_moves(&pos));
        assert_eq!(&moves[..3], &["d7d5", "d7d6", "d7e6"][..]);
    }

    #[test]
    fn en_passant_is_generated() {
        let pos = Position::from_fen_str(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3"
        ).expect("valid fen");
        let ep: Vec<_> = pseudo_legal_moves(&pos).into_iter()
            .filter(|mv| mv.kind() == MoveKind::EnPassant)
            .collect();
        assert_eq!(names(&ep), vec!["e5f6"]);
    }

    #[test]
    fn legal_moves_drop_pinned_and_unsafe_moves() {
        let pos = Position::from_fen_str("4k3/8/8/b7/8/8/3N4/4K3 w - - 0 1").expect("valid fen");
        let pseudo = pseudo_legal_moves(&pos);
        let legal = legal_moves(&pos);
        assert!(pseudo.iter().any(|mv| mv.origin() == Square::D2));
        assert!(legal.iter().all(|mv| mv.origin() != Square::D2));
        assert!(legal.iter().all(|mv| pseudo.contains(mv)));
    }

    #[test]
    fn checkmate_has_no_legal_moves() {
        let pos = Position::from_fen_str("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("valid fen");
        assert!(legal_moves(&pos).is_empty());
        assert!(!pseudo_legal_moves(&pos).is_empty());
    }
}
