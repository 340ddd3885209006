//! Magic multipliers for the sliding-piece tables, and the slow reference code they index
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! The constants were found offline by trial. Each one maps every subset of its square's blocker
//! mask onto a distinct index in `64 - popcount(mask)` bits. The ray-casting functions here are
//! only used while building the tables and for cross-checking them.
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Returns the squares that can hold a piece blocking a rook on `sq`
///
/// Squares on the edge of the board are left out, since there is nothing beyond them to block.
///
/// ```rust
/// use chess::Square;
/// use chess::bitboard::rook_blocker_mask;
///
/// assert_eq!(rook_blocker_mask(Square::A1).bits(), 0x0001_0101_0101_017e);
/// ```
pub fn rook_blocker_mask(sq: Square) -> Bitboard {
    blocker_mask(sq, &ROOK_DIRECTIONS)
}

/// Returns the squares that can hold a piece blocking a bishop on `sq`
///
/// ```rust
/// use chess::Square;
/// use chess::bitboard::bishop_blocker_mask;
///
/// assert_eq!(bishop_blocker_mask(Square::D4).bits(), 0x0040_2214_0014_2200);
/// ```
pub fn bishop_blocker_mask(sq: Square) -> Bitboard {
    blocker_mask(sq, &BISHOP_DIRECTIONS)
}

/// Computes rook attacks from `sq` by walking each ray until it hits a piece in `occ`
pub fn rook_ray_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, occ, &ROOK_DIRECTIONS)
}

/// Computes bishop attacks from `sq` by walking each ray until it hits a piece in `occ`
pub fn bishop_ray_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, occ, &BISHOP_DIRECTIONS)
}

fn on_board(file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

fn to_square(file: i8, rank: i8) -> Square {
    Square::try_from((rank * 8 + file) as usize).expect("INFALLIBLE")
}

fn blocker_mask(sq: Square, directions: &[(i8, i8)]) -> Bitboard {
    let mut mask = Bitboard::new();

    for &(df, dr) in directions {
        let (mut f, mut r) = (sq.file() as i8 + df, sq.rank() as i8 + dr);

        // stop one square short of the edge
        while on_board(f + df, r + dr) {
            mask.insert(to_square(f, r));
            f += df;
            r += dr;
        }
    }

    mask
}

fn ray_attacks(sq: Square, occ: Bitboard, directions: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::new();

    for &(df, dr) in directions {
        let (mut f, mut r) = (sq.file() as i8 + df, sq.rank() as i8 + dr);

        while on_board(f, r) {
            let target = to_square(f, r);
            attacks.insert(target);
            if occ.contains(target) {
                break;
            }
            f += df;
            r += dr;
        }
    }

    attacks
}

/// Returns the `index`th subset of `mask`
///
/// The bits of `index` are mapped onto the squares of `mask` in ascending order, so every index
/// below `2^mask.len()` gives a distinct subset.
pub(crate) fn blocker_board(index: usize, mask: Bitboard) -> Bitboard {
    let mut board = Bitboard::new();

    for (bit, sq) in mask.into_iter().enumerate() {
        if index & (1 << bit) != 0 {
            board.insert(sq);
        }
    }

    board
}

/// Rook magic multipliers, indexed by square
pub const ROOK_MAGICS: [u64; Square::COUNT] = [
    0x8a80_1040_0080_0020, 0x0140_0020_0010_0040,
    0x0280_1880_a001_7001, 0x0100_0810_0100_0420,
    0x0200_0200_1008_0420, 0x0300_1c00_0201_0008,
    0x8480_0080_0200_0100, 0x2080_0880_0440_2900,
    0x0000_8000_9820_4000, 0x2024_4010_0020_0040,
    0x0100_8020_0080_1000, 0x0120_8008_0080_1000,
    0x0208_8080_8800_0400, 0x0002_8022_0080_0400,
    0x2200_8001_0002_0080, 0x0801_0000_6082_1100,
    0x0080_0440_0642_2000, 0x0100_8080_2000_4000,
    0x1210_8a00_1020_4200, 0x0140_8480_1000_0802,
    0x0481_8280_1400_2800, 0x8094_0040_0200_4100,
    0x4010_0400_1001_0802, 0x0000_0200_0880_6104,
    0x0100_4000_8020_8000, 0x2040_0021_2008_1000,
    0x0021_2006_8010_0081, 0x0020_1000_8008_0080,
    0x0002_000a_0020_0410, 0x0000_0200_8080_0400,
    0x0080_0884_0010_0102, 0x0080_0046_0004_2881,
    0x4040_0080_4080_0020, 0x0440_0030_0020_0801,
    0x0004_2000_1100_4500, 0x0188_0200_1010_0100,
    0x0014_8004_0180_2800, 0x2080_0400_8080_0200,
    0x0124_0802_0400_1001, 0x0200_0465_0200_0484,
    0x0480_4000_8008_8020, 0x1000_4220_1003_4000,
    0x0030_2001_0011_0040, 0x0000_1000_2101_0009,
    0x2002_0801_0011_0004, 0x0202_0080_0400_8002,
    0x0020_0200_0401_0100, 0x2048_4400_4082_0001,
    0x0101_0022_0040_8200, 0x0040_8020_0040_1080,
    0x4008_1420_0441_0100, 0x0206_0820_c012_0200,
    0x0001_0010_0408_0100, 0x020c_0200_8004_0080,
    0x2935_6108_3002_2400, 0x0044_4400_4100_9200,
    0x0280_0010_4080_2101, 0x2100_1900_4000_2085,
    0x80c0_0841_0010_2001, 0x4024_0810_0100_0421,
    0x0002_0030_a024_4872, 0x0012_0010_0841_4402,
    0x0200_6104_900a_0804, 0x0001_0040_8100_2402,
];

/// Bishop magic multipliers, indexed by square
pub const BISHOP_MAGICS: [u64; Square::COUNT] = [
    0x0040_0408_4440_4084, 0x0020_0420_8a00_4208,
    0x0010_1900_4108_0202, 0x0108_0608_4504_2010,
    0x0581_1041_8080_0210, 0x2112_0804_4620_0010,
    0x1080_8208_2006_0210, 0x03c0_8084_1022_0200,
    0x0004_0504_0444_0404, 0x0000_0210_0142_0088,
    0x24d0_0808_0108_2102, 0x0001_020a_0a02_0400,
    0x0000_0403_0820_0402, 0x0004_0110_0210_0800,
    0x0401_4841_0410_4005, 0x0801_0104_0202_0200,
    0x0040_0210_c388_0100, 0x0404_0220_2410_8200,
    0x0810_0182_0020_4102, 0x0004_0028_01a0_2003,
    0x0085_0408_2008_0400, 0x8101_02c8_0888_0400,
    0x000e_9004_1088_4800, 0x8002_0204_8084_0102,
    0x0220_2008_6509_0201, 0x2010_100a_0202_1202,
    0x0152_0484_0802_2401, 0x0020_0800_0208_1110,
    0x4001_0010_2100_4000, 0x8000_4040_0a01_1002,
    0x00e4_0040_8101_1002, 0x001c_0040_0101_2080,
    0x8004_2009_62a0_0220, 0x8422_1002_0850_0202,
    0x2000_4022_0030_0c08, 0x8646_0200_8008_0080,
    0x8002_0a02_0010_0808, 0x2010_0048_8011_1000,
    0x6230_00a0_8001_1400, 0x4200_8c03_4020_9202,
    0x0209_1882_4000_1000, 0x4004_08a8_8400_1800,
    0x0011_0400_a608_0400, 0x1840_060a_4402_0800,
    0x0090_0801_0400_0041, 0x0201_0110_0080_8101,
    0x1a22_0808_0504_f080, 0x8012_0206_0021_1212,
    0x0500_8610_1124_0000, 0x0180_8061_0820_0800,
    0x4000_020e_0104_0044, 0x3000_0026_1044_000a,
    0x0802_2411_0202_0002, 0x0020_9060_6121_0001,
    0x5a84_8410_0401_0310, 0x0004_0108_0101_1c04,
    0x000a_0101_0950_2200, 0x0000_004a_0201_2000,
    0x5002_0101_0098_b028, 0x8040_0028_1104_0900,
    0x0028_0000_1002_0204, 0x0600_0020_202d_0240,
    0x8918_8448_4208_2200, 0x4010_0110_2902_0020,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocker_masks_skip_the_edges() {
        assert_eq!(rook_blocker_mask(Square::E4).len(), 10);
        assert_eq!(rook_blocker_mask(Square::A1).len(), 12);
        assert_eq!(rook_blocker_mask(Square::H8).len(), 12);
        assert_eq!(bishop_blocker_mask(Square::A1).len(), 6);
        assert_eq!(bishop_blocker_mask(Square::E4).len(), 9);
        assert!(!rook_blocker_mask(Square::E4).contains(Square::E8));
        assert!(!rook_blocker_mask(Square::E4).contains(Square::A4));
        assert!(!bishop_blocker_mask(Square::E4).contains(Square::H7));
    }

    #[test]
    fn rays_stop_on_the_first_blocker() {
        let occ = Bitboard::from(Square::E6) | Square::C4.into() | Square::G6.into();
        let rook = rook_ray_attacks(Square::E4, occ);
        assert!(rook.contains(Square::E6));
        assert!(!rook.contains(Square::E7));
        assert!(rook.contains(Square::C4));
        assert!(!rook.contains(Square::B4));
        assert!(rook.contains(Square::H4));
        assert!(rook.contains(Square::E1));
        assert_eq!(rook.len(), 10);

        let bishop = bishop_ray_attacks(Square::E4, occ);
        assert!(bishop.contains(Square::G6));
        assert!(!bishop.contains(Square::H7));
        assert!(bishop.contains(Square::A8));
        assert!(bishop.contains(Square::H1));
        assert!(bishop.contains(Square::B1));
    }

    #[test]
    fn blocker_boards_are_distinct_subsets() {
        let mask = rook_blocker_mask(Square::D5);
        let count = 1 << mask.len();
        let mut seen = std::collections::HashSet::new();

        for index in 0..count {
            let board = blocker_board(index, mask);
            assert_eq!(board & !mask, Bitboard::new());
            assert!(seen.insert(board));
        }
        assert_eq!(blocker_board(count - 1, mask), mask);
    }
}
