//! Errors reported by the chess crate
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use crate::{Piece, Square};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Everything that can go wrong when reading a position or applying a move
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed text, such as a bad square name or side-to-move letter
    ParseError,
    /// FEN string does not have exactly six fields
    FieldCount,
    /// FEN board does not describe eight ranks of eight squares
    RankCount,
    /// Unrecognized piece letter
    UnknownPiece,
    /// The side not on move is in check, either in a parsed position or after a move
    KingCapturable,
    /// A side has no king, or more than one
    InvalidKingCount,
    /// A pawn stands on the first or eighth rank
    InvalidPawnRank,
    /// A castling right whose king or rook is not on its home square
    InvalidCastlingFlags,
    /// No enemy pawn stands in front of the en-passant target
    MissingEnPassantPawn,
    /// Something stands on the en-passant target
    EnPassantSquareOccupied,
    /// En-passant square is not on the rank a pawn skips over
    InvalidEnPassantRank,
    /// A magic constant maps two blocker boards of a square to the same table index
    MagicCollision(Piece, Square),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "malformed input".fmt(f),
            FieldCount => "FEN must have exactly six fields".fmt(f),
            RankCount => "FEN board must have eight ranks of eight squares".fmt(f),
            UnknownPiece => "unrecognized piece letter".fmt(f),
            KingCapturable => "the side not to move is in check".fmt(f),
            InvalidKingCount => "each side needs exactly one king".fmt(f),
            InvalidPawnRank => "pawns cannot stand on the first or eighth rank".fmt(f),
            InvalidCastlingFlags => "castling right without king and rook on their home squares".fmt(f),
            MissingEnPassantPawn => "no pawn to capture en passant".fmt(f),
            EnPassantSquareOccupied => "en-passant target is occupied".fmt(f),
            InvalidEnPassantRank => "en-passant square is on the wrong rank".fmt(f),
            MagicCollision(piece, sq) => {
                write!(f, "magic constant for {} on {} maps two blocker boards to one index",
                    piece, sq)
            },
        }
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Shorthand for results carrying an [`Error`](enum.Error.html)
pub type Result<T> = std::result::Result<T, Error>;
