//! Sets of squares packed into 64 bits, and the attack tables built from them
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Every attack query in the crate answers with a [`Bitboard`](struct.Bitboard.html). The
//! lookups live in one [`AttackTables`](struct.AttackTables.html), built the first time it is
//! needed, and the free functions below read from it.
//!
//! Knights, kings and capturing pawns jump straight to their targets, so a square is all they
//! need:
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::knight_attacks;
//!
//! let targets: Vec<Square> = knight_attacks(Square::H1).into_iter().collect();
//! assert_eq!(targets, vec![Square::F2, Square::G3]);
//! ```
//!
//! Bishops, rooks and queens stop at the first occupied square along each line, which is
//! included in the result whatever stands on it:
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::{Bitboard, rook_attacks};
//!
//! let blockers = Bitboard::from(Square::C1) | Square::A2.into();
//! let targets: Vec<Square> = rook_attacks(Square::A1, blockers).into_iter().collect();
//! assert_eq!(targets, vec![Square::B1, Square::C1, Square::A2]);
//! ```
//!
//! [`Bitboard::shift`](struct.Bitboard.html#method.shift) moves a whole set at once. Squares
//! pushed past an edge disappear instead of reappearing on the far side:
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::Bitboard;
//!
//! let pawns = Bitboard::from(Square::A2) | Square::H2.into();
//! assert_eq!(pawns.shift(1, 1), Bitboard::from(Square::B3));
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::fmt;
use std::iter::{Extend, FromIterator, FusedIterator};
use std::ops;
use super::*;

mod attacks;
mod magics;
pub use attacks::*;
pub use magics::{ROOK_MAGICS, BISHOP_MAGICS};
pub use magics::{rook_blocker_mask, bishop_blocker_mask, rook_ray_attacks, bishop_ray_attacks};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A set of [`Square`](../enum.Square.html)s
///
/// Bit `n` stands for the square numbered `n`, so the low byte is the first rank and the high
/// byte the eighth:
///
/// ```text
///    8 | 56 57 58 59 60 61 62 63
///    7 | 48 49 50 51 52 53 54 55
///    6 | 40 41 42 43 44 45 46 47
///    5 | 32 33 34 35 36 37 38 39
///    4 | 24 25 26 27 28 29 30 31
///    3 | 16 17 18 19 20 21 22 23
///    2 |  8  9 10 11 12 13 14 15
///    1 |  0  1  2  3  4  5  6  7
///      +------------------------
///         a  b  c  d  e  f  g  h
/// ```
///
/// Union, intersection, difference and complement are the operators `|`, `&`, `& !` and `!`.
/// Iterating a bitboard consumes a copy of it and yields its squares lowest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    /// A bitboard with every square
    pub const ALL: Bitboard = Bitboard(!0);

    /// Returns the empty set
    pub fn new() -> Bitboard {
        Default::default()
    }

    /// Returns the raw 64-bit value
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Counts the squares in the set
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if there are no squares in the set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `sq` is in the set
    pub fn contains(self, sq: Square) -> bool {
        !(self & sq.into()).is_empty()
    }

    /// Returns `true` if the sets share at least one square
    pub fn intersects(self, other: Bitboard) -> bool {
        !(self & other).is_empty()
    }

    /// Returns `true` if the sets share no square
    pub fn is_disjoint(self, other: Bitboard) -> bool {
        (self & other).is_empty()
    }

    /// Adds `sq` to the set
    pub fn insert(&mut self, sq: Square) {
        *self |= sq.into();
    }

    /// Takes `sq` out of the set
    pub fn remove(&mut self, sq: Square) {
        *self &= !Bitboard::from(sq);
    }

    /// Adds `sq` if it is missing, or takes it out if it is present
    pub fn toggle(&mut self, sq: Square) {
        *self ^= sq.into();
    }

    /// Takes the lowest square out of the set and returns it
    pub fn pop(&mut self) -> Option<Square> {
        let sq = self.peek()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Returns the lowest square in the set
    pub fn peek(self) -> Option<Square> {
        match self.0 {
            0 => None,
            bits => Square::try_from(bits.trailing_zeros() as usize).ok(),
        }
    }

    /// Returns a bitboard with all squares shifted by `x` files and `y` ranks
    ///
    /// Squares that would leave the board are dropped, in both directions. Guards are only
    /// applied for single-file and two-file steps, which covers every piece's movement.
    ///
    /// ```rust
    /// # use chess::Square;
    /// # use chess::bitboard::Bitboard;
    /// #
    /// assert_eq!(Bitboard::from(Square::H4).shift(1, 0), Bitboard::new());
    /// assert_eq!(Bitboard::from(Square::B4).shift(-2, 1), Bitboard::new());
    /// assert_eq!(Bitboard::from(Square::E8).shift(0, 1), Bitboard::new());
    /// assert_eq!(Bitboard::from(Square::G1).shift(-1, 2), Bitboard::from(Square::F3));
    /// ```
    pub fn shift(self, x: i8, y: i8) -> Bitboard {
        // squares that would wrap around onto the opposite edge
        let guard = match x {
            1 => NOT_FILE_H,
            2 => NOT_FILES_GH,
            -1 => NOT_FILE_A,
            -2 => NOT_FILES_AB,
            _ => !0,
        };
        let bits = (y * 8 + x) as i32;
        let masked = self.0 & guard;

        if bits > 0 {
            Bitboard(masked << bits)
        } else {
            Bitboard(masked >> -bits)
        }
    }
}

const FILE_A: u64 = 0x0101_0101_0101_0101;
const FILE_B: u64 = FILE_A << 1;
const FILE_G: u64 = FILE_A << 6;
const FILE_H: u64 = FILE_A << 7;
const NOT_FILE_A: u64 = !FILE_A;
const NOT_FILE_H: u64 = !FILE_H;
const NOT_FILES_AB: u64 = !(FILE_A | FILE_B);
const NOT_FILES_GH: u64 = !(FILE_G | FILE_H);

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl ops::BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl ops::BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Binary for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl From<u64> for Bitboard {
    fn from(val: u64) -> Bitboard {
        Bitboard(val)
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Bitboard {
        Bitboard(1 << sq as u64)
    }
}

impl From<File> for Bitboard {
    fn from(f: File) -> Bitboard {
        Bitboard(FILE_A << f as u64)
    }
}

impl From<Rank> for Bitboard {
    fn from(r: Rank) -> Bitboard {
        Bitboard(0x0000_0000_0000_00ff << (8 * r as u64))
    }
}

impl From<IntoIter> for Bitboard {
    fn from(iter: IntoIter) -> Bitboard {
        iter.0
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Bitboard::new();
        set.extend(iter);
        set
    }
}

impl Extend<Square> for Bitboard {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        iter.into_iter().for_each(|sq| self.insert(sq));
    }
}

/// Iterator over the squares of a `Bitboard`, in ascending order
#[derive(Debug, Copy, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl FusedIterator for IntoIter { }
