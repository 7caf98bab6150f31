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

//! Attacks of the pieces which move by fixed steps: kings, knights, and
//! pawns.

use super::{Bitboard, Color, Direction, Square};

/// King steps from White's point of view. Black's are the negations, so the
/// union of both gives all eight neighbors.
const KING_STEPS: [Direction; 4] = [
    Direction::NORTHWEST,
    Direction::NORTH,
    Direction::NORTHEAST,
    Direction::EAST,
];

/// Pawn capture steps from White's point of view.
const PAWN_STEPS: [Direction; 2] = [Direction::NORTHWEST, Direction::NORTHEAST];

/// Knight steps from White's point of view.
const KNIGHT_STEPS: [Direction; 4] = [
    Direction::WEST.then(Direction::NORTHWEST),
    Direction::EAST.then(Direction::NORTHEAST),
    Direction::NORTH.then(Direction::NORTHWEST),
    Direction::NORTH.then(Direction::NORTHEAST),
];

/// A step which travels this far or farther has wrapped around the edge of
/// the board.
const WRAP_DISTANCE: u8 = 3;

/// A bitboard of all the squares a knight on the square at the index can
/// attack.
pub const KNIGHT_ATTACKS: [Bitboard; 64] = both_colors(&KNIGHT_STEPS);

/// A bitboard of all the squares a king on the square at the index can attack.
pub const KING_ATTACKS: [Bitboard; 64] = both_colors(&KING_STEPS);

/// A bitboard of all the squares which a pawn on the given square can
/// attack. The first index is for White's pawn attacks, the second is for
/// Black's.
pub const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    create_step_attacks(&PAWN_STEPS, Color::White),
    create_step_attacks(&PAWN_STEPS, Color::Black),
];

/// Get the union of the step attacks of both colors.
const fn both_colors(steps: &[Direction]) -> [Bitboard; 64] {
    let white = create_step_attacks(steps, Color::White);
    let black = create_step_attacks(steps, Color::Black);
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut i = 0;
    while i < 64 {
        attacks[i] = white[i].union(black[i]);
        i += 1;
    }
    attacks
}

/// Get the step attacks that could be made by moving along `steps` (negated
/// for Black) from each square. Steps which land off the board or wrap around
/// an edge are dropped.
const fn create_step_attacks(steps: &[Direction], color: Color) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut i = 0;
    while i < 64 {
        let sq = Square::ALL[i];
        let mut j = 0;
        while j < steps.len() {
            let step = match color {
                Color::White => steps[j],
                Color::Black => steps[j].opposite(),
            };
            if let Some(target) = sq.checked_step(step) {
                if target.chebyshev_to(sq) < WRAP_DISTANCE {
                    attacks[i] = attacks[i].with_square(target);
                }
            }
            j += 1;
        }
        i += 1;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that corner pieces lose the steps which would leave the board.
    fn corner_attacks() {
        assert_eq!(KNIGHT_ATTACKS[Square::A1 as usize].len(), 2);
        assert_eq!(KING_ATTACKS[Square::A1 as usize].len(), 3);
        assert_eq!(
            KNIGHT_ATTACKS[Square::A1 as usize],
            Bitboard::EMPTY
                .with_square(Square::B3)
                .with_square(Square::C2)
        );
        assert_eq!(KNIGHT_ATTACKS[Square::H8 as usize].len(), 2);
        assert_eq!(KING_ATTACKS[Square::H8 as usize].len(), 3);
    }

    #[test]
    /// Test that pieces in the center get every step.
    fn central_attacks() {
        assert_eq!(KNIGHT_ATTACKS[Square::D4 as usize].len(), 8);
        assert_eq!(KING_ATTACKS[Square::D4 as usize].len(), 8);
    }

    #[test]
    /// Test that no step attack wraps from the east edge to the west edge.
    fn no_wraparound() {
        let west_files = Bitboard::FILE_A | Bitboard::FILES[1];
        for sq in Bitboard::FILE_H | Bitboard::FILES[6] {
            assert!((KNIGHT_ATTACKS[sq as usize] & west_files).is_empty());
            assert!((KING_ATTACKS[sq as usize] & west_files).is_empty());
        }
        assert_eq!(
            KNIGHT_ATTACKS[Square::G5 as usize],
            Bitboard::EMPTY
                .with_square(Square::E4)
                .with_square(Square::E6)
                .with_square(Square::F3)
                .with_square(Square::F7)
                .with_square(Square::H3)
                .with_square(Square::H7)
        );
        assert_eq!(
            KING_ATTACKS[Square::H4 as usize],
            Bitboard::EMPTY
                .with_square(Square::G3)
                .with_square(Square::H3)
                .with_square(Square::G4)
                .with_square(Square::G5)
                .with_square(Square::H5)
        );
    }

    #[test]
    /// Test that pawns attack diagonally forward for their own color.
    fn pawn_attacks() {
        let white = PAWN_ATTACKS[Color::White as usize];
        let black = PAWN_ATTACKS[Color::Black as usize];
        assert_eq!(
            white[Square::E4 as usize],
            Bitboard::EMPTY
                .with_square(Square::D5)
                .with_square(Square::F5)
        );
        assert_eq!(
            black[Square::E4 as usize],
            Bitboard::EMPTY
                .with_square(Square::D3)
                .with_square(Square::F3)
        );
        assert_eq!(white[Square::A2 as usize], Bitboard::from(Square::B3));
        assert_eq!(black[Square::H7 as usize], Bitboard::from(Square::G6));
        assert!(white[Square::C8 as usize].is_empty());
    }
}
