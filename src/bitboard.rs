/*
  Fiddler, a UCI-compatible chess engine.
  Copyright (C) 2022 The Fiddler Authors (see AUTHORS.md file)

  Fiddler is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Fiddler is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Bitboards, data structures used to efficiently represent sets of squares.

use super::{Color, Square};

use std::{
    fmt::{Display, Formatter, Result},
    iter::Iterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Shl, Shr},
};

/// A bitboard, which uses an integer to express a set of `Square`s.
/// This expression allows the efficient computation of set intersection, union,
/// disjunction, element selection, and more, all in constant time.
///
/// Nearly all board-related representations use `Bitboard`s as a key part of
/// their construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// A bitboard representing the empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{Bitboard, Square};
    ///
    /// let sq = Square::A1; // this could be any square
    /// assert!(!Bitboard::EMPTY.contains(sq));
    /// ```
    pub const EMPTY: Bitboard = Bitboard::new(0);

    /// A bitboard containing all 64 squares on the board, i.e. the universal
    /// set.
    ///
    /// Often, it can be used as an efficient way to iterate over every square
    /// of a board.
    ///
    /// ```
    /// use fiddler_tables::Bitboard;
    ///
    /// assert_eq!(Bitboard::ALL.count(), 64);
    /// ```
    pub const ALL: Bitboard = Bitboard::new(!0);

    /// The A file.
    pub const FILE_A: Bitboard = Bitboard::new(0x0101_0101_0101_0101);

    /// The H file.
    pub const FILE_H: Bitboard = Bitboard::new(0x8080_8080_8080_8080);

    /// The first rank.
    pub const RANK_1: Bitboard = Bitboard::new(0x0000_0000_0000_00FF);

    /// The eighth rank.
    pub const RANK_8: Bitboard = Bitboard::new(0xFF00_0000_0000_0000);

    /// Every file, indexed by file number (0 for A through 7 for H).
    pub const FILES: [Bitboard; 8] = {
        let mut files = [Bitboard::EMPTY; 8];
        let mut i = 0;
        while i < 8 {
            files[i] = Bitboard::new(Bitboard::FILE_A.0 << i);
            i += 1;
        }
        files
    };

    /// Every rank, indexed by rank number (0 for the first rank through 7 for
    /// the eighth).
    pub const RANKS: [Bitboard; 8] = {
        let mut ranks = [Bitboard::EMPTY; 8];
        let mut i = 0;
        while i < 8 {
            ranks[i] = Bitboard::new(Bitboard::RANK_1.0 << (8 * i));
            i += 1;
        }
        ranks
    };

    /// The diagonals running from the lower left to the upper right, named by
    /// their lowest square.
    /// Ordered A8, A7, ..., A1, B1, ..., H1.
    pub const DIAGONALS_UP: [Bitboard; 15] = [
        Bitboard::new(0x0100_0000_0000_0000), // a8
        Bitboard::new(0x0201_0000_0000_0000), // a7
        Bitboard::new(0x0402_0100_0000_0000), // a6
        Bitboard::new(0x0804_0201_0000_0000), // a5
        Bitboard::new(0x1008_0402_0100_0000), // a4
        Bitboard::new(0x2010_0804_0201_0000), // a3
        Bitboard::new(0x4020_1008_0402_0100), // a2
        Bitboard::new(0x8040_2010_0804_0201), // a1
        Bitboard::new(0x0080_4020_1008_0402), // b1
        Bitboard::new(0x0000_8040_2010_0804), // c1
        Bitboard::new(0x0000_0080_4020_1008), // d1
        Bitboard::new(0x0000_0000_8040_2010), // e1
        Bitboard::new(0x0000_0000_0080_4020), // f1
        Bitboard::new(0x0000_0000_0000_8040), // g1
        Bitboard::new(0x0000_0000_0000_0080), // h1
    ];

    /// The diagonals running from the upper left to the lower right, named by
    /// their highest square on the H file or their lowest square on the first
    /// rank.
    /// Ordered H8, H7, ..., H1, G1, ..., A1.
    pub const DIAGONALS_DOWN: [Bitboard; 15] = [
        Bitboard::new(0x8000_0000_0000_0000), // h8
        Bitboard::new(0x4080_0000_0000_0000), // h7
        Bitboard::new(0x2040_8000_0000_0000), // h6
        Bitboard::new(0x1020_4080_0000_0000), // h5
        Bitboard::new(0x0810_2040_8000_0000), // h4
        Bitboard::new(0x0408_1020_4080_0000), // h3
        Bitboard::new(0x0204_0810_2040_8000), // h2
        Bitboard::new(0x0102_0408_1020_4080), // h1
        Bitboard::new(0x0001_0204_0810_2040), // g1
        Bitboard::new(0x0000_0102_0408_1020), // f1
        Bitboard::new(0x0000_0001_0204_0810), // e1
        Bitboard::new(0x0000_0000_0102_0408), // d1
        Bitboard::new(0x0000_0000_0001_0204), // c1
        Bitboard::new(0x0000_0000_0000_0102), // b1
        Bitboard::new(0x0000_0000_0000_0001), // a1
    ];

    /// The dark squares, i.e. those where the sum of the file and rank
    /// numbers is even. A1 is dark.
    pub const DARK_SQUARES: Bitboard = {
        let mut bits = 0u64;
        let mut i = 0;
        while i < 64 {
            if ((i % 8) + (i / 8)) % 2 == 0 {
                bits |= 1 << i;
            }
            i += 1;
        }
        Bitboard::new(bits)
    };

    /// The light squares. H1 is light.
    pub const LIGHT_SQUARES: Bitboard = Bitboard::new(!Bitboard::DARK_SQUARES.0);

    #[inline(always)]
    #[must_use]
    /// Construct a new Bitboard from a numeric literal.
    /// Internally, `Bitboard`s are 64-bit integers, where the LSB represents
    /// whether the square A1 is an element, the second-least bit represents the
    /// square B1, and so on.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{Bitboard, Square};
    ///
    /// let mut bb = Bitboard::EMPTY;
    /// bb.insert(Square::A1);
    ///
    /// assert_eq!(bb, Bitboard::new(1));
    /// ```
    pub const fn new(x: u64) -> Bitboard {
        Bitboard(x)
    }

    #[inline(always)]
    #[must_use]
    /// Get the raw integer backing this bitboard.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[inline(always)]
    #[must_use]
    /// Determine whether this bitboard contains a given square.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{Bitboard, Square};
    ///
    /// assert!(Bitboard::new(1).contains(Square::A1));
    /// assert!(!(Bitboard::new(2).contains(Square::A1)));
    /// ```
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1 << square as u8) != 0
    }

    #[inline(always)]
    /// Add a square to the set of squares contained in this `Bitboard`.
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1 << sq as u8;
    }

    #[inline(always)]
    #[must_use]
    /// Get a copy of this bitboard with `sq` added to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{Bitboard, Square};
    ///
    /// let bb = Bitboard::EMPTY.with_square(Square::B1);
    /// assert_eq!(bb, Bitboard::new(2));
    /// ```
    pub const fn with_square(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | 1 << sq as u8)
    }

    #[inline(always)]
    #[must_use]
    /// Compute the union of two bitboards in a `const` context.
    pub const fn union(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }

    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    /// Compute the number of squares contained in this `Bitboard`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{Bitboard, Square};
    ///
    /// let mut bb = Bitboard::EMPTY;
    /// assert!(bb.len() == 0);
    /// bb.insert(Square::A1);
    /// assert!(bb.len() == 1);
    /// ```
    pub const fn len(self) -> u8 {
        self.0.count_ones() as u8
    }

    #[inline(always)]
    #[must_use]
    /// Count the number of trailing zeros (i.e. empty squares between A1 and
    /// the first non-empty square) in this bitboard.
    pub const fn trailing_zeros(self) -> u32 {
        self.0.trailing_zeros()
    }

    #[must_use]
    #[inline(always)]
    /// Determine whether this bitboard is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    /// Get the squares of the given color class.
    ///
    /// White corresponds to the light squares and Black to the dark ones.
    pub const fn square_colors(color: Color) -> Bitboard {
        match color {
            Color::White => Bitboard::LIGHT_SQUARES,
            Color::Black => Bitboard::DARK_SQUARES,
        }
    }

    #[must_use]
    /// Render this bitboard as 64 binary digits, with H8 first and A1 last.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::Bitboard;
    ///
    /// let s = Bitboard::new(5).bit_string();
    /// assert_eq!(s.len(), 64);
    /// assert!(s.ends_with("101"));
    /// ```
    pub fn bit_string(self) -> String {
        format!("{:064b}", self.0)
    }

    #[must_use]
    /// Render this bitboard as a boxed 8x8 board, with the eighth rank at the
    /// top and an `X` on every member square.
    pub fn board_string(self) -> String {
        const SEPARATOR: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut s = String::with_capacity(SEPARATOR.len() * 17);
        s.push_str(SEPARATOR);
        for rank in (0..8).rev() {
            for file in 0..8 {
                let bit = 1u64 << (8 * rank + file);
                s.push_str(if self.0 & bit == 0 { "|   " } else { "| X " });
            }
            s.push_str("|\n");
            s.push_str(SEPARATOR);
        }
        s
    }

    #[must_use]
    /// Render this bitboard in binary starting from A1, with a dot between
    /// every rank, followed by its decimal value in parentheses.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::Bitboard;
    ///
    /// assert_eq!(
    ///     Bitboard::new(0x101).grouped_string(),
    ///     "10000000.10000000.00000000.00000000.00000000.00000000.00000000.00000000 (257)"
    /// );
    /// ```
    pub fn grouped_string(self) -> String {
        let mut s = String::with_capacity(96);
        for i in 0..64 {
            if i > 0 && i % 8 == 0 {
                s.push('.');
            }
            s.push(if self.0 & (1 << i) == 0 { '0' } else { '1' });
        }
        s.push_str(&format!(" ({})", self.0));
        s
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    #[inline(always)]
    /// Compute the intersection of the sets represented by this bitboard and
    /// the right-hand side.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fiddler_tables::{Bitboard, Square};
    /// let bb1 = Bitboard::new(7); // {A1, B1, C1}
    /// let bb2 = Bitboard::new(14); // {B1, C1, D1}
    /// let intersection = bb1 & bb2; // {B1, C1}
    /// assert!(!intersection.contains(Square::A1));
    /// assert!(intersection.contains(Square::B1));
    /// assert!(intersection.contains(Square::C1));
    /// assert!(!intersection.contains(Square::D1));
    /// ```
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Shl<u8> for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn shl(self, rhs: u8) -> Self::Output {
        Bitboard(self.0 << rhs)
    }
}

impl Shr<u8> for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn shr(self, rhs: u8) -> Self::Output {
        Bitboard(self.0 >> rhs)
    }
}

impl Not for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Bitboard {
        Bitboard(1 << sq as u8)
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.board_string())
    }
}

#[allow(clippy::copy_iterator)]
impl Iterator for Bitboard {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }
        let result = Square::ALL[self.trailing_zeros() as usize];
        self.0 &= self.0 - 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that the file and rank tables line up with the named constants.
    fn files_and_ranks() {
        assert_eq!(Bitboard::FILES[0], Bitboard::FILE_A);
        assert_eq!(Bitboard::FILES[7], Bitboard::FILE_H);
        assert_eq!(Bitboard::RANKS[0], Bitboard::RANK_1);
        assert_eq!(Bitboard::RANKS[7], Bitboard::RANK_8);
        for i in 0..8 {
            assert_eq!(Bitboard::FILES[i].len(), 8);
            assert_eq!(Bitboard::RANKS[i].len(), 8);
        }
    }

    #[test]
    /// Test that each family of diagonals partitions the board.
    fn diagonals_partition_board() {
        for family in [Bitboard::DIAGONALS_UP, Bitboard::DIAGONALS_DOWN] {
            let mut seen = Bitboard::EMPTY;
            for diag in family {
                assert!((seen & diag).is_empty());
                seen |= diag;
            }
            assert_eq!(seen, Bitboard::ALL);
        }
    }

    #[test]
    /// Test that the square colors are as on a real board.
    fn square_colors() {
        assert!(Bitboard::DARK_SQUARES.contains(Square::A1));
        assert!(Bitboard::LIGHT_SQUARES.contains(Square::H1));
        assert!(Bitboard::LIGHT_SQUARES.contains(Square::D1));
        assert!(Bitboard::DARK_SQUARES.contains(Square::H8));
        assert_eq!(Bitboard::DARK_SQUARES.len(), 32);
        assert_eq!(
            Bitboard::square_colors(Color::White),
            Bitboard::LIGHT_SQUARES
        );
    }

    #[test]
    /// Test that iteration yields squares in order from A1 to H8.
    fn iterate_squares() {
        let bb = Bitboard::EMPTY
            .with_square(Square::H8)
            .with_square(Square::A1)
            .with_square(Square::E4);
        let squares: Vec<Square> = bb.collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
    }

    #[test]
    /// Test that the bit string places A1 last.
    fn bit_string() {
        let s = Bitboard::from(Square::H8).bit_string();
        assert!(s.starts_with('1'));
        assert_eq!(s.matches('1').count(), 1);
        assert_eq!(Bitboard::from(Square::A1).bit_string(), format!("{:064b}", 1));
    }

    #[test]
    /// Test that the board string marks the right cells.
    fn board_string() {
        let s = Bitboard::from(Square::A8).board_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], "+---+---+---+---+---+---+---+---+");
        assert_eq!(lines[1], "| X |   |   |   |   |   |   |   |");
        assert_eq!(s.matches('X').count(), 1);
    }

    #[test]
    /// Test the grouped rendering of the full board.
    fn grouped_string_all() {
        let s = Bitboard::ALL.grouped_string();
        assert!(s.starts_with("11111111.11111111"));
        assert!(s.ends_with(&format!("({})", u64::MAX)));
    }
}
