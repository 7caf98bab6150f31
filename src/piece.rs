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

//! Pieces, which contain no information about their color or current square.

use super::Direction;

use std::fmt::{Display, Formatter, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
/// The type of a piece. This contains no information about the location of a
/// piece, or of its color.
pub enum Piece {
    Knight = 0,
    Bishop,
    Rook,
    Queen,
    Pawn,
    King,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
/// A piece whose attacks travel along rays until blocked, and which therefore
/// needs a magic lookup table.
/// Queens are served by combining the two.
pub enum Slider {
    Bishop = 0,
    Rook,
}

impl Slider {
    /// Both sliding piece classes.
    pub const ALL: [Slider; 2] = [Slider::Bishop, Slider::Rook];

    #[must_use]
    /// Get the single-step directions along which this piece slides.
    pub const fn directions(self) -> &'static [Direction; 4] {
        match self {
            Slider::Bishop => &Direction::BISHOP_DIRECTIONS,
            Slider::Rook => &Direction::ROOK_DIRECTIONS,
        }
    }
}

impl From<Slider> for Piece {
    fn from(slider: Slider) -> Piece {
        match slider {
            Slider::Bishop => Piece::Bishop,
            Slider::Rook => Piece::Rook,
        }
    }
}

impl Display for Slider {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Slider::Bishop => write!(f, "bishop"),
            Slider::Rook => write!(f, "rook"),
        }
    }
}
