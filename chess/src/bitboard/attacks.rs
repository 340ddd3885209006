//! Provides data and functions used to compute attacks
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use log::{debug, error};
use super::*;
use super::magics::*;

lazy_static! {
    static ref TABLES: AttackTables = match AttackTables::new() {
        Ok(tables) => tables,
        Err(e) => {
            error!("unable to build attack tables: {}", e);
            panic!("unable to build attack tables: {}", e);
        },
    };
}

/// Returns the process-wide attack tables, building them on first use
///
/// # Panics
/// Panics if one of the built-in magic constants is invalid. The collision is logged first.
pub fn tables() -> &'static AttackTables {
    &TABLES
}

/// Precomputed attacks for every piece type
///
/// Knights, kings and pawns use one 64-entry table each. Rooks and bishops use magic bitboards:
/// the occupied squares relevant to the origin are multiplied by a per-square constant, and the
/// high bits of the product index a dense table of attack sets.
///
/// Building the tables is the only fallible step. Lookups never fail.
pub struct AttackTables {
    king: [Bitboard; Square::COUNT],
    knight: [Bitboard; Square::COUNT],
    pawn: [[Bitboard; Square::COUNT]; Color::COUNT],
    rook: [Magic; Square::COUNT],
    bishop: [Magic; Square::COUNT],
    rook_moves: Vec<Bitboard>,
    bishop_moves: Vec<Bitboard>,
}

#[derive(Debug, Copy, Clone, Default)]
struct Magic {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    #[inline]
    fn index(&self, occ: Bitboard) -> usize {
        let hash = (occ & self.mask).0.wrapping_mul(self.magic) >> self.shift;
        self.offset + hash as usize
    }
}

impl AttackTables {
    /// Builds the tables with the built-in magic constants
    pub fn new() -> Result<AttackTables> {
        AttackTables::with_magics(&ROOK_MAGICS, &BISHOP_MAGICS)
    }

    /// Builds the tables with the given magic constants, indexed by square
    ///
    /// Returns `Err(Error::MagicCollision(piece, sq))` for the first square whose constant maps
    /// two different blocker boards to the same index, even when they share an attack set.
    pub fn with_magics(
        rook_magics: &[u64; Square::COUNT],
        bishop_magics: &[u64; Square::COUNT],
    ) -> Result<AttackTables> {
        let mut king = [Bitboard::new(); Square::COUNT];
        let mut knight = [Bitboard::new(); Square::COUNT];
        let mut pawn = [[Bitboard::new(); Square::COUNT]; Color::COUNT];

        for (i, sq) in Bitboard::ALL.into_iter().enumerate() {
            let bb = Bitboard::from(sq);

            king[i] = KING_STEPS.iter().fold(Bitboard::new(), |acc, &(x, y)| acc | bb.shift(x, y));
            knight[i] = KNIGHT_JUMPS.iter()
                .fold(Bitboard::new(), |acc, &(x, y)| acc | bb.shift(x, y));
            for &c in Color::ALL.iter() {
                pawn[c as usize][i] = bb.shift(-1, c.forward()) | bb.shift(1, c.forward());
            }
        }

        let (rook, rook_moves) =
            build_sliders(Piece::Rook, rook_magics, rook_blocker_mask, rook_ray_attacks)?;
        let (bishop, bishop_moves) =
            build_sliders(Piece::Bishop, bishop_magics, bishop_blocker_mask, bishop_ray_attacks)?;

        debug!("attack tables built: {} rook entries, {} bishop entries",
            rook_moves.len(), bishop_moves.len());

        Ok(AttackTables { king, knight, pawn, rook, bishop, rook_moves, bishop_moves })
    }

    /// Returns the squares a king on `sq` attacks
    #[inline]
    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq as usize]
    }

    /// Returns the squares a knight on `sq` attacks
    #[inline]
    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq as usize]
    }

    /// Returns the squares a pawn of color `c` on `sq` attacks
    #[inline]
    pub fn pawn(&self, c: Color, sq: Square) -> Bitboard {
        self.pawn[c as usize][sq as usize]
    }

    /// Returns the squares a rook on `sq` attacks, given the occupied squares `occ`
    #[inline]
    pub fn rook(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.rook_moves[self.rook[sq as usize].index(occ)]
    }

    /// Returns the squares a bishop on `sq` attacks, given the occupied squares `occ`
    #[inline]
    pub fn bishop(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.bishop_moves[self.bishop[sq as usize].index(occ)]
    }

    /// Returns the squares a queen on `sq` attacks, given the occupied squares `occ`
    #[inline]
    pub fn queen(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.rook(sq, occ) | self.bishop(sq, occ)
    }
}

impl fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackTables")
            .field("rook_moves", &self.rook_moves.len())
            .field("bishop_moves", &self.bishop_moves.len())
            .finish()
    }
}

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-1, -2), (1, -2), (-2, -1), (2, -1), (-2, 1), (2, 1), (-1, 2), (1, 2),
];

fn build_sliders(
    piece: Piece,
    magics: &[u64; Square::COUNT],
    blocker_mask: fn(Square) -> Bitboard,
    ray_attacks: fn(Square, Bitboard) -> Bitboard,
) -> Result<([Magic; Square::COUNT], Vec<Bitboard>)> {
    let mut entries = [Magic::default(); Square::COUNT];
    let mut moves = Vec::new();

    for (i, sq) in Bitboard::ALL.into_iter().enumerate() {
        let mask = blocker_mask(sq);
        let size = 1usize << mask.len();
        let entry = Magic {
            mask,
            magic: magics[i],
            shift: 64 - mask.len() as u32,
            offset: moves.len(),
        };
        let mut filled = vec![false; size];
        moves.resize(entry.offset + size, Bitboard::new());

        for index in 0..size {
            let blockers = blocker_board(index, mask);
            let slot = entry.index(blockers);

            if filled[slot - entry.offset] {
                return Err(Error::MagicCollision(piece, sq));
            }
            filled[slot - entry.offset] = true;
            moves[slot] = ray_attacks(sq, blockers);
        }

        entries[i] = entry;
    }

    Ok((entries, moves))
}

/// Computes king-like attacks to or from `sq`
///
/// See the module-level documentation for more information about
/// [this function](index.html#direct-attacks-knights-kings-and-pawns) and
/// [other attack functions](index.html#moves-and-attacks).
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    tables().king(sq)
}

/// Computes knight-like attacks to or from `sq`
///
/// See the module-level documentation for more information about
/// [this function](index.html#direct-attacks-knights-kings-and-pawns) and
/// [other attack functions](index.html#moves-and-attacks).
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    tables().knight(sq)
}

/// Computes the squares a pawn of color `c` on `sq` attacks
///
/// Used the other way around, `pawn_attacks(!c, sq)` gives the squares from which a pawn of
/// color `c` attacks `sq`.
///
/// ```rust
/// use chess::{Color, Square};
/// use chess::bitboard::pawn_attacks;
///
/// let mut attacks = pawn_attacks(Color::Black, Square::A5);
/// assert_eq!(attacks.pop(), Some(Square::B4));
/// assert_eq!(attacks.pop(), None);
/// ```
#[inline]
pub fn pawn_attacks(c: Color, sq: Square) -> Bitboard {
    tables().pawn(c, sq)
}

/// Computes rook-like attacks to or from `sq` based on the occupied squares
/// given by `occ`
///
/// See the module-level documentation for more information about
/// [this function](index.html#sliding-attacks-bishops-rooks-and-queens) and
/// [other attack functions](index.html#moves-and-attacks).
#[inline]
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    tables().rook(sq, occ)
}

/// Computes bishop-like attacks to or from `sq` based on the occupied squares
/// given by `occ`
///
/// See the module-level documentation for more information about
/// [this function](index.html#sliding-attacks-bishops-rooks-and-queens) and
/// [other attack functions](index.html#moves-and-attacks).
#[inline]
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    tables().bishop(sq, occ)
}

/// Computes queen-like attacks to or from square based on the occupied squares
/// given by `occ`
#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    tables().queen(sq, occ)
}
