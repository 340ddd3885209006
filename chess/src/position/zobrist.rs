//! Incremental position hashing
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A 64-bit Zobrist hash of a position
///
/// Every feature of a position (a piece on a square, the castling rights, the en-passant file and
/// the side to move) has a random key, and a position's hash is the XOR of the keys of its
/// features. Since XOR is its own inverse, toggling a feature twice leaves the hash unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Zobrist(u64);

impl Zobrist {
    /// Returns the hash of an empty board with white to move and no rights
    pub fn new() -> Zobrist {
        Zobrist(0)
    }

    /// Toggles a piece of color `c` and type `p` on `sq`
    pub fn toggle_piece(&mut self, c: Color, p: Piece, sq: Square) {
        self.0 ^= KEYS.pieces[c as usize][p as usize][sq as usize];
    }

    /// Toggles the en-passant target `sq`
    ///
    /// Only the file of the square contributes to the hash.
    pub fn toggle_ep_square(&mut self, sq: Square) {
        self.0 ^= KEYS.ep_file[sq.file() as usize];
    }

    /// Toggles a complete 4-bit castling rights mask
    pub fn toggle_castling_rights(&mut self, rights: u8) {
        self.0 ^= KEYS.castling[(rights & 0xf) as usize];
    }

    /// Toggles the side to move
    pub fn toggle_turn(&mut self) {
        self.0 ^= KEYS.black_to_move;
    }
}

impl fmt::Display for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::UpperHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<Zobrist> for u64 {
    /// ```rust
    /// use chess::Position;
    ///
    /// let buckets = 1 << 16;
    /// let slot = u64::from(Position::new().zobrist_key()) % buckets;
    /// assert!(slot < buckets);
    /// ```
    fn from(key: Zobrist) -> Self {
        key.0
    }
}

const SEED: u64 = 0x4b65_7374_7265_6c21;

struct Keys {
    pieces: [[[u64; Square::COUNT]; Piece::COUNT]; Color::COUNT],
    castling: [u64; 16],
    ep_file: [u64; File::COUNT],
    black_to_move: u64,
}

impl Keys {
    fn generate() -> Keys {
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut keys = Keys {
            pieces: [[[0; Square::COUNT]; Piece::COUNT]; Color::COUNT],
            castling: [0; 16],
            ep_file: [0; File::COUNT],
            black_to_move: 0,
        };

        for color in keys.pieces.iter_mut() {
            for piece in color.iter_mut() {
                rng.fill(&mut piece[..]);
            }
        }
        // the empty rights mask keeps a zero key
        rng.fill(&mut keys.castling[1..]);
        rng.fill(&mut keys.ep_file[..]);
        keys.black_to_move = rng.gen();

        keys
    }
}

lazy_static! {
    static ref KEYS: Keys = Keys::generate();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_the_key() {
        let mut key = Zobrist::new();
        key.toggle_piece(Color::White, Piece::Knight, Square::G1);
        key.toggle_castling_rights(0b1011);
        key.toggle_ep_square(Square::D6);
        key.toggle_turn();
        assert_ne!(key, Zobrist::new());

        key.toggle_turn();
        key.toggle_ep_square(Square::D3);
        key.toggle_castling_rights(0b1011);
        key.toggle_piece(Color::White, Piece::Knight, Square::G1);
        assert_eq!(key, Zobrist::new());
    }

    #[test]
    fn keys_are_distinct() {
        let mut all: Vec<u64> = KEYS.pieces.iter()
            .flat_map(|c| c.iter())
            .flat_map(|p| p.iter())
            .copied()
            .collect();
        all.extend(KEYS.castling[1..].iter());
        all.extend(KEYS.ep_file.iter());
        all.push(KEYS.black_to_move);
        let len = all.len();

        all.sort();
        all.dedup();
        assert_eq!(all.len(), len);
        assert_eq!(KEYS.castling[0], 0);
    }
}
