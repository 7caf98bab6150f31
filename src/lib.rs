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

//! Precomputed attack tables for move generation: magic bitboards for
//! bishops, rooks, and queens, step tables for kings, knights, and pawns, and
//! the geometric masks derived from them.
//!
//! The tables are found and filled in at runtime. Most users only need the
//! free functions here, which consult the global [`TABLES`]:
//!
//! ```
//! use fiddler_tables::{rook_attacks, Bitboard, Square};
//!
//! let occupancy = Bitboard::EMPTY.with_square(Square::A4);
//! assert_eq!(rook_attacks(Square::A1, occupancy).len(), 3 + 7);
//! ```

#![warn(clippy::pedantic)]

// Many module elements are re-exported to make names more ergonomic to access.

mod bitboard;
pub use crate::bitboard::Bitboard;

mod castling;
pub use castling::{castle_mask, CastleRights, CastleSide};

mod color;
pub use color::Color;

mod direction;
pub use direction::{Direction, Orientation};

pub mod magic;

mod masks;
pub use masks::Masks;

mod piece;
pub use piece::{Piece, Slider};

mod prng;
pub use prng::Prng;

mod square;
pub use square::Square;

mod steps;
pub use steps::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

mod tables;
pub use tables::{
    attacks, bishop_attacks, king_attacks, knight_attacks, masks, pawn_attacks, queen_attacks,
    rook_attacks, Tables, TABLES,
};
