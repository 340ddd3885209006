//! The board and everything else needed to continue a game from it
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::fmt;
use super::*;

use bitboard::tables;
use zobrist::Zobrist;

use Color::*;
use Piece::*;

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Piece placement, side to move, castling rights, en-passant target and move counters
///
/// Twelve bitboards, one per color and piece type, hold the pieces. The per-color, per-type and
/// combined occupancy sets are rebuilt from them whenever they change.
///
/// Build one with [`new`](#method.new) for the initial setup, or from FEN text with
/// [`from_fen_str`](#method.from_fen_str) or `str::parse`. After that, only
/// [`make_move`](#method.make_move) changes it, and [`undo_move`](#method.undo_move) with the
/// same move changes it back. Undo moves in the reverse of the order they were made.
///
/// ```rust
/// use chess::Position;
/// use chess::movegen::pseudo_legal_moves;
///
/// let mut pos = Position::new();
/// let mut legal = 0;
///
/// for mv in pseudo_legal_moves(&pos) {
///     if pos.make_move(&mv).is_ok() {
///         legal += 1;
///         pos.undo_move(&mv);
///     }
/// }
/// assert_eq!(legal, 20);
/// assert_eq!(pos, Position::new());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    pieces: [[Bitboard; Piece::COUNT]; Color::COUNT],
    occ_by_color: [Bitboard; Color::COUNT],
    occ_by_type: [Bitboard; Piece::COUNT],
    occ_squares: Bitboard,
    turn: Color,

    castling_rights: u8,
    ep_square: Option<Square>,
    draw_plies: u32,
    move_num: u32,

    zobrist: Zobrist,
}

const CASTLE_WHITE_KING_SIDE: u8 = 0x1;
const CASTLE_WHITE_QUEEN_SIDE: u8 = 0x2;
const CASTLE_BLACK_KING_SIDE: u8 = 0x4;
const CASTLE_BLACK_QUEEN_SIDE: u8 = 0x8;
const CASTLE_ALL: u8 = 0xf;

/// One of the two directions a king may castle in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    /// Castling with the rook on the `H` file
    KingSide,
    /// Castling with the rook on the `A` file
    QueenSide,
}

impl CastlingSide {
    /// Both sides, king side first
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    /// Returns the bit in the 4-bit castling rights mask for `c` castling on this side
    pub fn mask(self, c: Color) -> u8 {
        match (c, self) {
            (White, CastlingSide::KingSide) => CASTLE_WHITE_KING_SIDE,
            (White, CastlingSide::QueenSide) => CASTLE_WHITE_QUEEN_SIDE,
            (Black, CastlingSide::KingSide) => CASTLE_BLACK_KING_SIDE,
            (Black, CastlingSide::QueenSide) => CASTLE_BLACK_QUEEN_SIDE,
        }
    }

    /// Returns the file the castling rook starts on
    pub fn rook_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    /// Returns the file the king lands on
    pub fn king_destination_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    /// Returns the file the rook lands on
    pub fn rook_destination_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// Returns the side a castling king landing on `file` castled toward
    pub fn from_king_destination(file: File) -> CastlingSide {
        if file > File::E { CastlingSide::KingSide } else { CastlingSide::QueenSide }
    }
}

impl Position {
    /// Returns the initial setup of a game.
    pub fn new() -> Position {
        Position::from_fen_str(STARTING_FEN).expect("INFALLIBLE")
    }

    /// Returns a position with no pieces, white to move.
    fn empty_board() -> Position {
        Position {
            pieces: [[Bitboard::new(); Piece::COUNT]; Color::COUNT],
            occ_by_color: [Bitboard::new(); Color::COUNT],
            occ_by_type: [Bitboard::new(); Piece::COUNT],
            occ_squares: Bitboard::new(),
            turn: White,
            castling_rights: 0,
            ep_square: None,
            draw_plies: 0,
            move_num: 1,
            zobrist: Zobrist::new(),
        }
    }

    /// Reads a position from Forsyth-Edwards Notation.
    ///
    /// All six fields are required. The position must also make sense: one king per side, no
    /// pawns on the first or last rank, no capturable king, castling rights only with the king and
    /// rook at home, and an en-passant square only right behind a pawn that just advanced two.
    pub fn from_fen_str(s: &str) -> Result<Position> {
        use Error::*;

        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FieldCount);
        }

        let mut pos = Position::empty_board();

        // parse the board, rank 8 first
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(RankCount);
        }
        for (i, row) in ranks.iter().enumerate() {
            let rank = Rank::try_from(Rank::COUNT - 1 - i)?;
            let mut f = 0;

            for c in row.chars() {
                if let Some(n) = c.to_digit(10) {
                    if n == 0 {
                        return Err(RankCount);
                    }
                    f += n as usize;
                } else {
                    let (color, piece) = Piece::from_char(c).ok_or(UnknownPiece)?;
                    let file = File::try_from(f).map_err(|_| RankCount)?;
                    let sq = Square::from_coord(file, rank);
                    pos.pieces[color as usize][piece as usize].insert(sq);
                    f += 1;
                }
                if f > File::COUNT {
                    return Err(RankCount);
                }
            }
            if f != File::COUNT {
                return Err(RankCount);
            }
        }

        // side to move
        pos.turn = fields[1].parse()?;

        // castling
        if fields[2] != "-" {
            for c in fields[2].chars() {
                pos.castling_rights |= match c {
                    'K' => CASTLE_WHITE_KING_SIDE,
                    'Q' => CASTLE_WHITE_QUEEN_SIDE,
                    'k' => CASTLE_BLACK_KING_SIDE,
                    'q' => CASTLE_BLACK_QUEEN_SIDE,
                    _ => return Err(ParseError),
                };
            }
        }

        // en-passant target
        if fields[3] != "-" {
            pos.ep_square = Some(fields[3].parse()?);
        }

        pos.draw_plies = fields[4].parse().map_err(|_| ParseError)?;
        pos.move_num = fields[5].parse().map_err(|_| ParseError)?;

        pos.refresh();
        pos.validate()?;
        pos.zobrist = pos.calc_zobrist();

        Ok(pos)
    }

    /// Checks that a freshly parsed position makes sense
    fn validate(&self) -> Result<()> {
        use Error::*;

        for &c in Color::ALL.iter() {
            if self.occupied_by_piece(c, King).len() != 1 {
                return Err(InvalidKingCount);
            }
        }

        let back_ranks = Bitboard::from(Rank::R1) | Rank::R8.into();
        if self.occupied_by_type(Pawn).intersects(back_ranks) {
            return Err(InvalidPawnRank);
        }

        if self.is_check(!self.turn) {
            return Err(KingCapturable);
        }

        for &c in Color::ALL.iter() {
            let home = Rank::R1.relative_to(c);
            for &side in CastlingSide::ALL.iter() {
                if self.castling_rights & side.mask(c) != 0 {
                    let king_home = Square::from_coord(File::E, home);
                    let rook_home = Square::from_coord(side.rook_file(), home);

                    if !self.occupied_by_piece(c, King).contains(king_home)
                        || !self.occupied_by_piece(c, Rook).contains(rook_home)
                    {
                        return Err(InvalidCastlingFlags);
                    }
                }
            }
        }

        if let Some(sq) = self.ep_square {
            if sq.rank() != Rank::R6.relative_to(self.turn) {
                return Err(InvalidEnPassantRank);
            }
            if self.occ_squares.contains(sq) {
                return Err(EnPassantSquareOccupied);
            }
            let pawn_sq = sq.offset_rank(-self.turn.forward()).ok_or(InvalidEnPassantRank)?;
            if !self.occupied_by_piece(!self.turn, Pawn).contains(pawn_sq) {
                return Err(MissingEnPassantPawn);
            }
        }

        Ok(())
    }

    /// Writes the position as Forsyth-Edwards Notation.
    pub fn to_fen_str(&self) -> String {
        let mut board = String::new();

        for r in (0..Rank::COUNT).rev() {
            let mut count = 0;
            for f in 0..File::COUNT {
                let sq = Square::try_from(r * File::COUNT + f).expect("INFALLIBLE");
                if let Some((c, p)) = self.piece_at(sq) {
                    if count > 0 {
                        board += &count.to_string();
                        count = 0;
                    }
                    board.push(p.to_char(c));
                } else {
                    count += 1;
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
            if r > 0 {
                board += "/";
            }
        }

        let mut castling: String = [
            (CASTLE_WHITE_KING_SIDE, 'K'),
            (CASTLE_WHITE_QUEEN_SIDE, 'Q'),
            (CASTLE_BLACK_KING_SIDE, 'k'),
            (CASTLE_BLACK_QUEEN_SIDE, 'q'),
        ].iter().filter(|(bit, _)| self.castling_rights & bit != 0).map(|(_, ch)| ch).collect();
        if castling.is_empty() {
            castling += "-";
        }

        let ep_square = self.ep_square.map_or_else(|| "-".to_owned(), |sq| sq.to_string());

        format!("{} {} {} {} {} {}", board, self.turn, castling, ep_square,
                                     self.draw_plies, self.move_num)
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the square a pawn skipped over on the last move, if it did.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the 4-bit castling rights mask
    ///
    /// White king side is `0x1`, white queen side `0x2`, black king side `0x4` and black queen
    /// side `0x8`.
    pub fn castling_rights(&self) -> u8 {
        self.castling_rights
    }

    /// Returns `true` if `c` still has the right to castle on `side`.
    pub fn has_castling_right(&self, c: Color, side: CastlingSide) -> bool {
        self.castling_rights & side.mask(c) != 0
    }

    /// Returns the number of plies since the last capture or pawn move.
    pub fn half_move_clock(&self) -> u32 {
        self.draw_plies
    }

    /// Returns the full move number, which starts at 1 and grows after each black move.
    pub fn move_number(&self) -> u32 {
        self.move_num
    }

    /// Returns every occupied square.
    pub fn occupied(&self) -> Bitboard {
        self.occ_squares
    }

    /// Returns the squares holding pieces of color `c`.
    pub fn occupied_by(&self, c: Color) -> Bitboard {
        self.occ_by_color[c as usize]
    }

    /// Returns the squares holding pieces of type `p`, either color.
    pub fn occupied_by_type(&self, p: Piece) -> Bitboard {
        self.occ_by_type[p as usize]
    }

    /// Returns the squares holding pieces of color `c` and type `p`.
    pub fn occupied_by_piece(&self, c: Color, p: Piece) -> Bitboard {
        self.pieces[c as usize][p as usize]
    }

    /// Returns the square of `c`'s king.
    pub fn king_location(&self, c: Color) -> Option<Square> {
        self.occupied_by_piece(c, King).peek()
    }

    /// Returns what stands on `sq`, if anything.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.occ_squares.contains(sq) {
            return None;
        }

        let c = if self.occupied_by(White).contains(sq) { White } else { Black };
        Piece::ALL.iter()
            .find(|&&p| self.occupied_by_piece(c, p).contains(sq))
            .map(|&p| (c, p))
    }

    /// Returns the hash key, kept current by every move.
    pub fn zobrist_key(&self) -> Zobrist {
        self.zobrist
    }

    /// Calculates the Zobrist key from scratch.
    ///
    /// This always equals [`zobrist_key`](#method.zobrist_key), which is kept up to date
    /// incrementally instead.
    pub fn calc_zobrist(&self) -> Zobrist {
        let mut zobrist = Zobrist::new();

        if self.turn == Black {
            zobrist.toggle_turn();
        }

        if let Some(ep_square) = self.ep_square {
            zobrist.toggle_ep_square(ep_square);
        }

        zobrist.toggle_castling_rights(self.castling_rights);

        for &c in Color::ALL.iter() {
            for &p in Piece::ALL.iter() {
                for sq in self.occupied_by_piece(c, p) {
                    zobrist.toggle_piece(c, p, sq);
                }
            }
        }

        zobrist
    }

    /// Returns the pieces of color `c` that attack `sq`.
    ///
    /// Each piece type's attack pattern is applied from `sq` and intersected with the pieces of
    /// that type, which works because every pattern except the pawn's is symmetric.
    pub fn attackers_to(&self, sq: Square, c: Color) -> Bitboard {
        let tables = tables();
        let occ = self.occ_squares;
        let queens = self.occupied_by_piece(c, Queen);

        (tables.pawn(!c, sq) & self.occupied_by_piece(c, Pawn))
            | (tables.knight(sq) & self.occupied_by_piece(c, Knight))
            | (tables.king(sq) & self.occupied_by_piece(c, King))
            | (tables.bishop(sq, occ) & (self.occupied_by_piece(c, Bishop) | queens))
            | (tables.rook(sq, occ) & (self.occupied_by_piece(c, Rook) | queens))
    }

    /// Returns `true` if any piece of color `c` attacks `sq`.
    pub fn square_attacked_by(&self, sq: Square, c: Color) -> bool {
        !self.attackers_to(sq, c).is_empty()
    }

    /// Returns `true` if the king of color `c` is attacked.
    pub fn is_check(&self, c: Color) -> bool {
        match self.king_location(c) {
            Some(sq) => self.square_attacked_by(sq, !c),
            None => false,
        }
    }

    /// Returns `true` if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_check(self.turn)
    }

    /// Returns `true` if `c` may castle on `side` right now.
    ///
    /// The right must not have been lost, every square between king and rook must be empty, and
    /// none of the squares the king starts on, passes over or lands on may be attacked.
    pub fn can_castle(&self, c: Color, side: CastlingSide) -> bool {
        if !self.has_castling_right(c, side) {
            return false;
        }

        let home = Rank::R1.relative_to(c);
        let king_sq = Square::from_coord(File::E, home);
        let rook_sq = Square::from_coord(side.rook_file(), home);
        if !self.occupied_by_piece(c, Rook).contains(rook_sq)
            || !self.occupied_by_piece(c, King).contains(king_sq)
        {
            return false;
        }

        let between = tables().rook(king_sq, self.occ_squares) & Bitboard::from(home);
        if !between.contains(rook_sq) {
            return false;
        }

        let (first, last) = match side {
            CastlingSide::KingSide => (File::E as usize, File::G as usize),
            CastlingSide::QueenSide => (File::C as usize, File::E as usize),
        };
        (first..=last).all(|f| {
            let sq = Square::from_coord(File::try_from(f).expect("INFALLIBLE"), home);
            !self.square_attacked_by(sq, !c)
        })
    }

    /// Toggles a single piece and its hash key.
    fn toggle_piece(&mut self, c: Color, p: Piece, sq: Square) {
        self.pieces[c as usize][p as usize].toggle(sq);
        self.zobrist.toggle_piece(c, p, sq);
    }

    /// Recomputes the derived bitboards from the piece bitboards.
    fn refresh(&mut self) {
        for &p in Piece::ALL.iter() {
            self.occ_by_type[p as usize] =
                self.pieces[White as usize][p as usize] | self.pieces[Black as usize][p as usize];
        }
        for &c in Color::ALL.iter() {
            self.occ_by_color[c as usize] =
                self.pieces[c as usize].iter().fold(Bitboard::new(), |acc, &bb| acc | bb);
        }
        self.occ_squares = self.occ_by_color[White as usize] | self.occ_by_color[Black as usize];
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod zobrist;
mod make;
