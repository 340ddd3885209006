//! Contains structures to represent moves, and to find them from text
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use regex::Regex;
use super::*;
use movegen::legal_moves;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A move to an empty square which is none of the special kinds below
    Quiet,
    /// A capture on the destination square, other than a promotion
    Capture,
    /// A two-square pawn advancement
    DoublePawnPush,
    /// An en passant capture
    EnPassant,
    /// A castling move, described by the king's origin and destination
    Castle,
    /// A pawn promotion to an empty square
    Promotion,
    /// A pawn promotion with a capture
    PromotionCapture,
}

impl Default for MoveKind {
    fn default() -> Self {
        MoveKind::Quiet
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move from a specific position.
///
/// Besides the move itself, a `Move` remembers the parts of the position it is about to overwrite
/// (castling rights, en-passant square and half-move clock) so that
/// [`Position::undo_move`](struct.Position.html#method.undo_move) can restore them exactly. A
/// `Move` is therefore only meaningful for the position it was generated from.
///
/// The captured piece is read from the board when the move is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    color: Color,
    piece: Piece,
    orig: Square,
    dest: Square,
    kind: MoveKind,
    capt_pc: Option<Piece>,
    prom_pc: Option<Piece>,

    prev_castling_rights: u8,
    prev_ep_square: Option<Square>,
    prev_draw_plies: u32,
}

/// A sequence of moves, in generation order
pub type MoveList = Vec<Move>;

impl Move {
    /// Creates a move of the side to move's `piece` from `orig` to `dest` in `pos`.
    pub(crate) fn new(
        pos: &Position,
        piece: Piece,
        orig: Square,
        dest: Square,
        kind: MoveKind,
        prom_pc: Option<Piece>,
    ) -> Move {
        let capt_pc = match kind {
            MoveKind::EnPassant => Some(Piece::Pawn),
            _ => pos.piece_at(dest).map(|(_, p)| p),
        };

        Move {
            color: pos.turn(),
            piece,
            orig,
            dest,
            kind,
            capt_pc,
            prom_pc,
            prev_castling_rights: pos.castling_rights(),
            prev_ep_square: pos.en_passant_square(),
            prev_draw_plies: pos.half_move_clock(),
        }
    }

    /// Returns the color of the moving side.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the piece to be moved.
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Returns the origin square.
    pub fn origin(&self) -> Square {
        self.orig
    }

    /// Returns the destination square.
    pub fn destination(&self) -> Square {
        self.dest
    }

    /// Returns the kind of move.
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the captured piece, if any.
    pub fn captured_piece(&self) -> Option<Piece> {
        self.capt_pc
    }

    /// Returns the piece promoted to, if any.
    pub fn promotion(&self) -> Option<Piece> {
        self.prom_pc
    }

    /// Returns the square the captured piece stands on, if any.
    ///
    /// For en passant this is the square behind the destination rather than the destination.
    pub fn capture_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant => Some(Square::from_coord(self.dest.file(), self.orig.rank())),
            _ => self.capt_pc.map(|_| self.dest),
        }
    }

    /// Returns `true` if the move captures a piece.
    pub fn is_capture(&self) -> bool {
        self.capt_pc.is_some()
    }

    /// Returns `true` if the move is a promotion.
    pub fn is_promotion(&self) -> bool {
        self.prom_pc.is_some()
    }

    /// Returns `true` if the move is castling.
    pub fn is_castle(&self) -> bool {
        self.kind == MoveKind::Castle
    }

    /// Returns `true` if the move is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    /// For castling moves, returns the rook's origin and destination.
    pub fn castling_rook_squares(&self) -> Option<(Square, Square)> {
        if !self.is_castle() {
            return None;
        }

        let side = CastlingSide::from_king_destination(self.dest.file());
        let rank = self.orig.rank();
        Some((
            Square::from_coord(side.rook_file(), rank),
            Square::from_coord(side.rook_destination_file(), rank),
        ))
    }

    /// Returns the castling rights before this move.
    pub fn prev_castling_rights(&self) -> u8 {
        self.prev_castling_rights
    }

    /// Returns the en-passant square before this move.
    pub fn prev_en_passant_square(&self) -> Option<Square> {
        self.prev_ep_square
    }

    /// Returns the half-move clock before this move.
    pub fn prev_half_move_clock(&self) -> u32 {
        self.prev_draw_plies
    }
}

impl fmt::Display for Move {
    /// Writes the move in coordinate notation (eg g1f3, e7e8q, or e1g1)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = self.orig.to_string() + &self.dest.to_string();

        if let Some(p) = self.prom_pc {
            s.push(p.to_char(Color::Black));
        }

        s.fmt(f)
    }
}

lazy_static! {
    static ref COORDINATE_MOVE: Regex =
        Regex::new(r"^([a-h][1-8])([a-h][1-8])([nbrq])?$").expect("INFALLIBLE");
}

/// Splits a move in coordinate notation into origin, destination and promotion piece
///
/// ```rust
/// use chess::{Piece, Square};
/// use chess::parse_coordinate_move;
///
/// assert_eq!(parse_coordinate_move("e7e8q"), Some((Square::E7, Square::E8, Some(Piece::Queen))));
/// assert_eq!(parse_coordinate_move("g1f3"), Some((Square::G1, Square::F3, None)));
/// assert_eq!(parse_coordinate_move("e7e8Q"), None);
/// assert_eq!(parse_coordinate_move("Nf3"), None);
/// ```
pub fn parse_coordinate_move(s: &str) -> Option<(Square, Square, Option<Piece>)> {
    let caps = COORDINATE_MOVE.captures(s)?;

    let orig = caps.get(1)?.as_str().parse().ok()?;
    let dest = caps.get(2)?.as_str().parse().ok()?;
    let prom_pc = match caps.get(3) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };

    Some((orig, dest, prom_pc))
}

impl Position {
    /// Finds the legal move written as `s` in coordinate notation.
    ///
    /// Returns `None` if the text is malformed or names no legal move in this position. A pawn
    /// move to the last rank must name its promotion piece.
    pub fn find_move(&self, s: &str) -> Option<Move> {
        let (orig, dest, prom_pc) = parse_coordinate_move(s)?;

        legal_moves(self).into_iter().find(|mv| {
            mv.origin() == orig && mv.destination() == dest && mv.promotion() == prom_pc
        })
    }
}
