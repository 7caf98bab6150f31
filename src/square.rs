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

//! Squares, which are positions on a board.

use super::{Color, Direction};

use std::{
    convert::TryFrom,
    fmt::{Display, Formatter},
};

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A square: one of 64 spots on a board that a piece can occupy.
///
/// Internally, `Square`s are represented as a single integer to maintain a
/// small size. From MSB to LSB, each square is composed of:
/// * 2 unused bits
/// * 3 bits for the rank
/// * 3 bits for the file
pub enum Square {
    A1 = 0,
    B1,
    C1,
    D1,
    E1,
    F1,
    G1,
    H1,
    A2,
    B2,
    C2,
    D2,
    E2,
    F2,
    G2,
    H2,
    A3,
    B3,
    C3,
    D3,
    E3,
    F3,
    G3,
    H3,
    A4,
    B4,
    C4,
    D4,
    E4,
    F4,
    G4,
    H4,
    A5,
    B5,
    C5,
    D5,
    E5,
    F5,
    G5,
    H5,
    A6,
    B6,
    C6,
    D6,
    E6,
    F6,
    G6,
    H6,
    A7,
    B7,
    C7,
    D7,
    E7,
    F7,
    G7,
    H7,
    A8,
    B8,
    C8,
    D8,
    E8,
    F8,
    G8,
    H8,
}

impl Square {
    /// Every square, indexed by its integer representation.
    pub const ALL: [Square; 64] = {
        use self::Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1, //
            A2, B2, C2, D2, E2, F2, G2, H2, //
            A3, B3, C3, D3, E3, F3, G3, H3, //
            A4, B4, C4, D4, E4, F4, G4, H4, //
            A5, B5, C5, D5, E5, F5, G5, H5, //
            A6, B6, C6, D6, E6, F6, G6, H6, //
            A7, B7, C7, D7, E7, F7, G7, H7, //
            A8, B8, C8, D8, E8, F8, G8, H8, //
        ]
    };

    #[inline(always)]
    #[must_use]
    /// Create a Square from the given rank and file. The ranks run from 0 to 7
    /// (instead of 1 through 8), and the files run from A to H.
    /// Returns `None` if either coordinate is off the board.
    pub const fn new(rank: usize, file: usize) -> Option<Square> {
        if rank < 8 && file < 8 {
            Some(Square::ALL[(rank << 3) | file])
        } else {
            None
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the integer representing the rank (0 -> 1, ...) of this square.
    pub const fn rank(self) -> usize {
        (self as u8 >> 3u8) as usize
    }

    #[inline(always)]
    #[must_use]
    /// Get the integer representing the file (0 -> A, ...) of this square.
    pub const fn file(self) -> usize {
        (self as u8 & 7u8) as usize
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    /// Get the Chebyshev distance to another square.
    pub const fn chebyshev_to(self, rhs: Square) -> u8 {
        let rankdiff = ((rhs.rank() as i8) - (self.rank() as i8)).abs();
        let filediff = ((rhs.file() as i8) - (self.file() as i8)).abs();

        if rankdiff > filediff {
            rankdiff as u8
        } else {
            filediff as u8
        }
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    /// Add a direction to this square, returning `None` if the resulting index
    /// is not on the board.
    ///
    /// Note that this only checks the index: stepping east from H1 gives A2.
    /// Callers which care about wrapping around the board must also check the
    /// distance travelled.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{Direction, Square};
    ///
    /// assert_eq!(Square::A1.checked_step(Direction::NORTH), Some(Square::A2));
    /// assert_eq!(Square::A1.checked_step(Direction::SOUTH), None);
    /// ```
    pub const fn checked_step(self, dir: Direction) -> Option<Square> {
        let target = self as i8 + dir.0;
        if 0 <= target && target < 64 {
            Some(Square::ALL[target as usize])
        } else {
            None
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get the color class of this square. A1 is a dark (Black) square.
    pub const fn color(self) -> Color {
        if (self.rank() + self.file()) % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Convert an algebraic string (such as 'e7') to a square.
    /// To get an `Ok` result, the string must be two characters.
    /// The file must be in lowercase.
    ///
    /// # Errors
    ///
    /// This function will return an `Err` if `s` is not a legal algebraic
    /// square.
    pub fn from_algebraic(s: &str) -> Result<Square, &'static str> {
        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err("square name must be 2 characters");
        };
        let Some(file) = "abcdefgh".find(file_char) else {
            return Err("illegal file for square");
        };
        let rank = match rank_char.to_digit(10) {
            Some(n @ 1..=8) => n as usize,
            _ => return Err("expected number from 1 to 8 for square rank"),
        };
        Square::new(rank - 1, file).ok_or("square out of bounds")
    }

    #[must_use]
    /// Get the name of the file of this square. For instance, the square
    /// representing A1 will have the name "a".
    pub const fn file_name(self) -> &'static str {
        ["a", "b", "c", "d", "e", "f", "g", "h"][self.file()]
    }
}

impl Display for Square {
    #[inline(always)]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_name(), self.rank() + 1)
    }
}

impl TryFrom<u8> for Square {
    type Error = &'static str;

    #[inline(always)]
    fn try_from(x: u8) -> Result<Square, Self::Error> {
        Square::ALL
            .get(x as usize)
            .copied()
            .ok_or("input for square conversion is out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that stepping off the edge of the board by index fails.
    fn checked_step_bounds() {
        assert_eq!(Square::A1.checked_step(Direction::EAST), Some(Square::B1));
        assert_eq!(
            Square::A1.checked_step(Direction::NORTHEAST),
            Some(Square::B2)
        );
        assert_eq!(Square::H8.checked_step(Direction::NORTH), None);
        assert_eq!(Square::A1.checked_step(Direction::WEST), None);
        // wraps, but is still a square
        assert_eq!(Square::H1.checked_step(Direction::EAST), Some(Square::A2));
    }

    #[test]
    /// Test that the Chebyshev distance picks the larger axis.
    fn chebyshev() {
        assert_eq!(Square::A1.chebyshev_to(Square::H8), 7);
        assert_eq!(Square::H1.chebyshev_to(Square::A2), 7);
        assert_eq!(Square::D4.chebyshev_to(Square::E6), 2);
        assert_eq!(Square::D4.chebyshev_to(Square::D4), 0);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("e4"), Ok(Square::E4));
        assert_eq!(Square::from_algebraic("f7"), Ok(Square::F7));
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("a0").is_err());
        assert!(Square::from_algebraic("a10").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::G7.to_string(), "g7");
    }

    #[test]
    /// Test that the table of all squares matches the enum discriminants.
    fn all_in_order() {
        for (i, sq) in Square::ALL.iter().enumerate() {
            assert_eq!(*sq as usize, i);
            assert_eq!(Square::try_from(i as u8), Ok(*sq));
        }
        assert!(Square::try_from(64).is_err());
    }

    #[test]
    fn square_color() {
        assert_eq!(Square::A1.color(), Color::Black);
        assert_eq!(Square::B1.color(), Color::White);
        assert_eq!(Square::E4.color(), Color::White);
    }
}
