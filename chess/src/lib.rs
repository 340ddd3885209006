//! Board representation, move generation and move application for standard chess.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! The crate is built in layers. A [`Bitboard`](bitboard/struct.Bitboard.html) is a set of
//! squares. The [`bitboard`](bitboard/index.html) module also owns the precomputed attack tables,
//! including the magic-bitboard tables for rooks and bishops. A [`Position`](struct.Position.html)
//! is the mutable game state, changed only through paired calls to
//! [`make_move`](struct.Position.html#method.make_move) and
//! [`undo_move`](struct.Position.html#method.undo_move). The [`movegen`](movegen/index.html)
//! module produces candidate [`Move`](struct.Move.html)s and [`perft`](perft/index.html) counts
//! them for verification.
//!
//! ```rust
//! use chess::Position;
//!
//! let mut pos = Position::new();
//! let mv = pos.find_move("e2e4").expect("legal move");
//!
//! pos.make_move(&mv)?;
//! assert_eq!(pos.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//!
//! pos.undo_move(&mv);
//! assert_eq!(pos, Position::new());
//! # Ok::<(), chess::Error>(())
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]

use std::ops;
use std::fmt;
use std::mem;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// One of the two sides
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Both colors, white first
    pub const ALL: [Color; Color::COUNT] = [Color::White, Color::Black];

    /// Returns the direction pawns of this color advance in, in ranks
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
///
/// The type carries no behavior of its own. Material values, piece-square tables and display
/// symbols are looked up in tables indexed by `Piece as usize`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// All piece types in ascending order
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King,
    ];

    /// The piece types a pawn may promote to, in generation order
    pub const PROMOTIONS: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

    /// Returns the FEN letter for a piece of this type and color
    pub fn to_char(self, c: Color) -> char {
        let ch = PIECE_CHARS[self as usize];
        match c {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    /// Returns the color and type of the piece for a FEN letter
    pub fn from_char(ch: char) -> Option<(Color, Piece)> {
        let lower = ch.to_ascii_lowercase();
        let piece = PIECE_CHARS.iter().position(|&p| p == lower)?;
        let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };

        Piece::try_from(piece).ok().map(|p| (color, p))
    }
}

const PIECE_CHARS: [char; Piece::COUNT] = [ 'p', 'n', 'b', 'r', 'q', 'k' ];

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char(Color::White).fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next().and_then(Piece::from_char), chars.next()) {
            (Some((_, p)), None) => Ok(p),
            _ => Err(Error::UnknownPiece),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Pawn
    }
}

impl TryFrom<usize> for Piece {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Piece::ALL.get(value).copied().ok_or(Error::ParseError)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A column of the board, `a` on white's queenside through `h` on white's kingside
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A, B, C, D, E, F, G, H,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// All files from `a` to `h`
    pub const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ((b'a' + *self as u8) as char).fmt(f)
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [c @ b'a' ..= b'h'] => File::try_from((c - b'a') as usize),
            _ => Err(Error::ParseError),
        }
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        File::ALL.get(value).copied().ok_or(Error::ParseError)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A row of the board, `R1` holding white's pieces at the start and `R8` black's
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1, R2, R3, R4, R5, R6, R7, R8,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// All ranks from first to eighth
    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];

    /// Returns the rank as seen from `c`'s side of the board, so `R1` is the home rank of `c`
    pub fn relative_to(self, c: Color) -> Rank {
        match c {
            Color::White => self,
            Color::Black => Rank::try_from(7 - self as usize).expect("INFALLIBLE"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ((b'1' + *self as u8) as char).fmt(f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [c @ b'1' ..= b'8'] => Rank::try_from((c - b'1') as usize),
            _ => Err(Error::ParseError),
        }
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Rank::ALL.get(value).copied().ok_or(Error::ParseError)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// One of the 64 squares, named by file and rank
///
/// The octal discriminant is the rank digit followed by the file digit, so `A1` is 0, `H1` is 7,
/// `A2` is 8 and `H8` is 63.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Square {
    A1 = 0o00, B1 = 0o01, C1 = 0o02, D1 = 0o03, E1 = 0o04, F1 = 0o05, G1 = 0o06, H1 = 0o07,
    A2 = 0o10, B2 = 0o11, C2 = 0o12, D2 = 0o13, E2 = 0o14, F2 = 0o15, G2 = 0o16, H2 = 0o17,
    A3 = 0o20, B3 = 0o21, C3 = 0o22, D3 = 0o23, E3 = 0o24, F3 = 0o25, G3 = 0o26, H3 = 0o27,
    A4 = 0o30, B4 = 0o31, C4 = 0o32, D4 = 0o33, E4 = 0o34, F4 = 0o35, G4 = 0o36, H4 = 0o37,
    A5 = 0o40, B5 = 0o41, C5 = 0o42, D5 = 0o43, E5 = 0o44, F5 = 0o45, G5 = 0o46, H5 = 0o47,
    A6 = 0o50, B6 = 0o51, C6 = 0o52, D6 = 0o53, E6 = 0o54, F6 = 0o55, G6 = 0o56, H6 = 0o57,
    A7 = 0o60, B7 = 0o61, C7 = 0o62, D7 = 0o63, E7 = 0o64, F7 = 0o65, G7 = 0o66, H7 = 0o67,
    A8 = 0o70, B8 = 0o71, C8 = 0o72, D8 = 0o73, E8 = 0o74, F8 = 0o75, G8 = 0o76, H8 = 0o77,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = Square::H8 as usize + 1;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square::try_from(((rank as usize) << 3) + file as usize).expect("INFALLIBLE")
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::try_from((self as usize) & 7).expect("INFALLIBLE")
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::try_from((self as usize) >> 3).expect("INFALLIBLE")
    }

    /// Returns the square mirrored vertically, so `A1` becomes `A8`
    pub fn flip_rank(self) -> Square {
        Square::try_from(self as usize ^ 0o70).expect("INFALLIBLE")
    }

    /// Returns the square `ranks` ranks away along the same file, if it is on the board
    pub fn offset_rank(self, ranks: i8) -> Option<Square> {
        let rank = self.rank() as i8 + ranks;
        if (0..Rank::COUNT as i8).contains(&rank) {
            Rank::try_from(rank as usize).ok().map(|r| Square::from_coord(self.file(), r))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.file().to_string() + &self.rank().to_string()).fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() == 2 && s.is_char_boundary(1) {
            Ok(Square::from_coord(s[0..1].parse()?, s[1..2].parse()?))
        } else {
            Err(Error::ParseError)
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A1
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            // every value below COUNT is a discriminant
            Ok(unsafe { mem::transmute::<u8, Square>(value as u8) })
        } else {
            Err(Error::ParseError)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod bitboard;
pub mod movegen;
pub mod perft;

mod error;
mod moves;
mod position;

pub use bitboard::Bitboard;
pub use error::{Error, Result};
pub use moves::{Move, MoveKind, MoveList, parse_coordinate_move};
pub use position::{Position, CastlingSide, STARTING_FEN};
pub use position::zobrist::Zobrist;

#[cfg(test)]
mod color_tests {
    use super::Color;

    #[test]
    fn fen_letters() {
        for &c in Color::ALL.iter() {
            assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
        }
        assert_eq!(Color::Black.to_string(), "b");
        assert!("W".parse::<Color>().is_err());
    }

    #[test]
    fn forward_points_away_from_home_rank() {
        assert_eq!(Color::White.forward(), 1);
        assert_eq!(Color::Black.forward(), -1);
    }
}


#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::{File, Rank, Square};

    #[test]
    fn squares_are_numbered_rank_by_rank() {
        assert_eq!(Square::A1 as usize, 0);
        assert_eq!(Square::H1 as usize, 7);
        assert_eq!(Square::A2 as usize, 8);
        assert_eq!(Square::E4 as usize, 28);
        assert_eq!(Square::H8 as usize, 63);
    }

    #[test]
    fn coordinates_survive_a_round_trip() {
        for &f in File::ALL.iter() {
            for &r in Rank::ALL.iter() {
                let sq = Square::from_coord(f, r);
                assert_eq!((sq.file(), sq.rank()), (f, r));
                assert_eq!(sq.to_string().parse::<Square>().unwrap(), sq);
            }
        }
        assert_eq!(Square::G7.to_string(), "g7");
    }

    #[test]
    fn malformed_square_names() {
        for s in &["", "e", "5", "e0", "i4", "e44", "E4"] {
            assert!(s.parse::<Square>().is_err(), "{:?} parsed", s);
        }
    }

    #[test]
    fn offset_rank_stays_on_the_board() {
        assert_eq!(Square::E2.offset_rank(2), Some(Square::E4));
        assert_eq!(Square::E7.offset_rank(-1), Some(Square::E6));
        assert_eq!(Square::E8.offset_rank(1), None);
        assert_eq!(Square::A1.offset_rank(-1), None);
        assert_eq!(Square::C2.flip_rank(), Square::C7);
    }

    #[test]
    fn indices_past_the_board() {
        assert_eq!(Square::try_from(63).unwrap(), Square::H8);
        assert!(Square::try_from(Square::COUNT).is_err());
        assert!(File::try_from(File::COUNT).is_err());
        assert!(Rank::try_from(Rank::COUNT).is_err());
    }
}
