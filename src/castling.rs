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

//! Castling rights and the squares involved in castling.

use super::{Bitboard, Color, Square};

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The side of the board a king castles towards.
pub enum CastleSide {
    /// Castling towards the H file.
    King,
    /// Castling towards the A file.
    Queen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A simple struct to store a player's castling rights.
/// The internal bits are used to represent castling rights.
/// From MSB to LSB:
/// * 4 unused bits
/// * Black queenside castling
/// * Black kingside castling
/// * White queenside castling
/// * White kingside castling
pub struct CastleRights(pub u8);

impl CastleRights {
    /// A `CastleRights` where all rights are available.
    pub const ALL_RIGHTS: CastleRights = CastleRights(15);

    /// A `CastleRights` where no rights are available.
    pub const NO_RIGHTS: CastleRights = CastleRights(0);

    #[inline(always)]
    #[must_use]
    /// Create a `CastleRights` for kingside castling on one side.
    pub const fn king_castle(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(1),
            Color::Black => CastleRights(4),
        }
    }

    #[inline(always)]
    #[must_use]
    /// Create a `CastleRights` for queenside castling on one side.
    pub const fn queen_castle(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(2),
            Color::Black => CastleRights(8),
        }
    }

    #[must_use]
    /// Get the full rights for one color.
    pub const fn color_rights(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(3),
            Color::Black => CastleRights(12),
        }
    }

    #[must_use]
    /// Get the castling rights tied to a square: moving a piece from (or
    /// capturing on) one of these squares removes them.
    /// Squares other than the king and rook starting squares carry no rights.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{CastleRights, Color, Square};
    ///
    /// assert_eq!(
    ///     CastleRights::for_square(Square::H1),
    ///     CastleRights::king_castle(Color::White)
    /// );
    /// assert_eq!(CastleRights::for_square(Square::D4), CastleRights::NO_RIGHTS);
    /// ```
    pub const fn for_square(sq: Square) -> CastleRights {
        match sq {
            Square::E1 => CastleRights::color_rights(Color::White),
            Square::A1 => CastleRights::queen_castle(Color::White),
            Square::H1 => CastleRights::king_castle(Color::White),
            Square::E8 => CastleRights::color_rights(Color::Black),
            Square::A8 => CastleRights::queen_castle(Color::Black),
            Square::H8 => CastleRights::king_castle(Color::Black),
            _ => CastleRights::NO_RIGHTS,
        }
    }
}

#[must_use]
/// Get the squares between the king's and rook's starting squares for one
/// color and side, including the rook's square.
///
/// # Examples
///
/// ```
/// use fiddler_tables::{castle_mask, Bitboard, CastleSide, Color, Square};
///
/// let mask = castle_mask(Color::White, CastleSide::King);
/// assert_eq!(
///     mask,
///     Bitboard::EMPTY
///         .with_square(Square::F1)
///         .with_square(Square::G1)
///         .with_square(Square::H1)
/// );
/// ```
pub const fn castle_mask(color: Color, side: CastleSide) -> Bitboard {
    match (color, side) {
        (Color::White, CastleSide::King) => Bitboard::new(0x0000_0000_0000_00E0),
        (Color::White, CastleSide::Queen) => Bitboard::new(0x0000_0000_0000_000F),
        (Color::Black, CastleSide::King) => Bitboard::new(0xE000_0000_0000_0000),
        (Color::Black, CastleSide::Queen) => Bitboard::new(0x0F00_0000_0000_0000),
    }
}

impl BitOr<CastleRights> for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn bitor(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }
}

impl BitOrAssign<CastleRights> for CastleRights {
    #[inline(always)]
    fn bitor_assign(&mut self, other: CastleRights) {
        self.0 |= other.0;
    }
}

impl BitAnd<CastleRights> for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn bitand(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & other.0)
    }
}

impl BitAndAssign<CastleRights> for CastleRights {
    #[inline(always)]
    fn bitand_assign(&mut self, other: CastleRights) {
        self.0 &= other.0;
    }
}

impl Not for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn not(self) -> CastleRights {
        CastleRights(self.0 ^ 15)
    }
}
