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

//! Geometric masks derived from the board layout: lines through each
//! square, half-planes, rays, the squares between two squares, and pawn
//! corridors.

use super::{magic::SlidingAttacks, Bitboard, CastleRights, Color, Orientation, Square};

#[derive(Clone, Debug)]
/// Every per-square geometric mask.
///
/// Rays are derived from empty-board slider attacks, so building a `Masks`
/// requires finished magic tables.
pub struct Masks {
    diagonals_up: [Bitboard; 64],
    diagonals_down: [Bitboard; 64],
    files_west: [Bitboard; 64],
    files_east: [Bitboard; 64],
    ranks_north: [Bitboard; 64],
    ranks_south: [Bitboard; 64],
    file_west: [Bitboard; 64],
    file_east: [Bitboard; 64],
    rays: [[Bitboard; 64]; 8],
    intermediate: Box<[[Bitboard; 64]]>,
    passed_pawns: [[Bitboard; 64]; 2],
}

impl Masks {
    #[must_use]
    /// Compute every mask, using `bishops` and `rooks` for the rays.
    pub fn new(bishops: &SlidingAttacks, rooks: &SlidingAttacks) -> Masks {
        let mut masks = Masks {
            diagonals_up: [Bitboard::EMPTY; 64],
            diagonals_down: [Bitboard::EMPTY; 64],
            files_west: [Bitboard::EMPTY; 64],
            files_east: [Bitboard::EMPTY; 64],
            ranks_north: [Bitboard::EMPTY; 64],
            ranks_south: [Bitboard::EMPTY; 64],
            file_west: [Bitboard::EMPTY; 64],
            file_east: [Bitboard::EMPTY; 64],
            rays: [[Bitboard::EMPTY; 64]; 8],
            intermediate: vec![[Bitboard::EMPTY; 64]; 64].into_boxed_slice(),
            passed_pawns: [[Bitboard::EMPTY; 64]; 2],
        };

        for sq in Bitboard::ALL {
            let i = sq as usize;
            masks.diagonals_up[i] = first_containing(&Bitboard::DIAGONALS_UP, sq);
            masks.diagonals_down[i] = first_containing(&Bitboard::DIAGONALS_DOWN, sq);

            let (file, rank) = (sq.file(), sq.rank());
            for j in 0..8 {
                if j < file {
                    masks.files_west[i] |= Bitboard::FILES[j];
                }
                if j > file {
                    masks.files_east[i] |= Bitboard::FILES[j];
                }
                if j > rank {
                    masks.ranks_north[i] |= Bitboard::RANKS[j];
                }
                if j < rank {
                    masks.ranks_south[i] |= Bitboard::RANKS[j];
                }
            }
            if file > 0 {
                masks.file_west[i] = Bitboard::FILES[file - 1];
            }
            if file < 7 {
                masks.file_east[i] = Bitboard::FILES[file + 1];
            }
        }

        for sq in Bitboard::ALL {
            let i = sq as usize;
            let straight = rooks.attacks(sq, Bitboard::EMPTY);
            let diagonal = bishops.attacks(sq, Bitboard::EMPTY);
            for o in Orientation::ALL {
                masks.rays[o as usize][i] = match o {
                    Orientation::North => straight & masks.ranks_north[i],
                    Orientation::East => straight & masks.files_east[i],
                    Orientation::South => straight & masks.ranks_south[i],
                    Orientation::West => straight & masks.files_west[i],
                    Orientation::NorthEast => {
                        diagonal & masks.files_east[i] & masks.ranks_north[i]
                    }
                    Orientation::NorthWest => {
                        diagonal & masks.files_west[i] & masks.ranks_north[i]
                    }
                    Orientation::SouthEast => {
                        diagonal & masks.files_east[i] & masks.ranks_south[i]
                    }
                    Orientation::SouthWest => {
                        diagonal & masks.files_west[i] & masks.ranks_south[i]
                    }
                };
            }
        }

        for from in Bitboard::ALL {
            for to in Bitboard::ALL {
                let mut between = Bitboard::EMPTY;
                for o in Orientation::ALL {
                    let rays = &masks.rays[o as usize];
                    if rays[from as usize].contains(to) {
                        between |= rays[from as usize] & !rays[to as usize] & !Bitboard::from(to);
                    }
                }
                masks.intermediate[from as usize][to as usize] = between;
            }
        }

        for sq in Bitboard::ALL {
            let i = sq as usize;
            let (file, rank) = (sq.file(), sq.rank());
            for color in Color::ALL {
                let (forward, last_rank) = match color {
                    Color::White => (&masks.rays[Orientation::North as usize], 7),
                    Color::Black => (&masks.rays[Orientation::South as usize], 0),
                };
                let mut corridor = forward[i];
                if rank != last_rank {
                    if file < 7 {
                        corridor |= forward[i + 1];
                    }
                    if file > 0 {
                        corridor |= forward[i - 1];
                    }
                }
                masks.passed_pawns[color as usize][i] = corridor;
            }
        }

        masks
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::unused_self)]
    /// Get the squares on the same file as `sq`.
    pub const fn file_mask(&self, sq: Square) -> Bitboard {
        Bitboard::FILES[sq.file()]
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::unused_self)]
    /// Get the squares on the same rank as `sq`.
    pub const fn rank_mask(&self, sq: Square) -> Bitboard {
        Bitboard::RANKS[sq.rank()]
    }

    #[inline(always)]
    #[must_use]
    /// Get the diagonal through `sq` running from the lower left to the upper
    /// right.
    pub const fn diagonal_up(&self, sq: Square) -> Bitboard {
        self.diagonals_up[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the diagonal through `sq` running from the upper left to the lower
    /// right.
    pub const fn diagonal_down(&self, sq: Square) -> Bitboard {
        self.diagonals_down[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get every file strictly west of `sq`.
    pub const fn files_west(&self, sq: Square) -> Bitboard {
        self.files_west[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get every file strictly east of `sq`.
    pub const fn files_east(&self, sq: Square) -> Bitboard {
        self.files_east[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get every rank strictly north of `sq`.
    pub const fn ranks_north(&self, sq: Square) -> Bitboard {
        self.ranks_north[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get every rank strictly south of `sq`.
    pub const fn ranks_south(&self, sq: Square) -> Bitboard {
        self.ranks_south[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the file immediately west of `sq`, or nothing on the A file.
    pub const fn file_west(&self, sq: Square) -> Bitboard {
        self.file_west[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the file immediately east of `sq`, or nothing on the H file.
    pub const fn file_east(&self, sq: Square) -> Bitboard {
        self.file_east[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    pub const fn neighbour_files(&self, sq: Square) -> Bitboard {
        self.file_west[sq as usize].union(self.file_east[sq as usize])
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares an unobstructed slider on `sq` could reach in the
    /// given orientation, not including `sq` itself.
    pub const fn ray(&self, orientation: Orientation, sq: Square) -> Bitboard {
        self.rays[orientation as usize][sq as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares strictly between `from` and `to`. If the two squares
    /// are not on a common line, this is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{masks, Bitboard, Square};
    ///
    /// let between = masks().intermediate(Square::A1, Square::D4);
    /// assert_eq!(
    ///     between,
    ///     Bitboard::EMPTY
    ///         .with_square(Square::B2)
    ///         .with_square(Square::C3)
    /// );
    /// assert!(masks().intermediate(Square::A1, Square::B3).is_empty());
    /// ```
    pub fn intermediate(&self, from: Square, to: Square) -> Bitboard {
        self.intermediate[from as usize][to as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares in front of a pawn of the given color on `sq` and on
    /// the adjacent files. A pawn with no enemy pawns in this corridor is
    /// passed.
    pub const fn passed_pawn_mask(&self, color: Color, sq: Square) -> Bitboard {
        self.passed_pawns[color as usize][sq as usize]
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::unused_self)]
    /// Get the castling rights lost when a piece moves from or to `sq`.
    pub const fn castling_rights(&self, sq: Square) -> CastleRights {
        CastleRights::for_square(sq)
    }
}

/// Find the first line in `lines` which passes through `sq`.
fn first_containing(lines: &[Bitboard], sq: Square) -> Bitboard {
    lines
        .iter()
        .copied()
        .find(|line| line.contains(sq))
        .unwrap_or(Bitboard::EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::TABLES;

    fn masks() -> &'static Masks {
        TABLES.masks()
    }

    #[test]
    fn diagonals() {
        assert_eq!(
            masks().diagonal_up(Square::C3),
            Bitboard::new(0x8040_2010_0804_0201)
        );
        assert_eq!(
            masks().diagonal_down(Square::E4),
            Bitboard::new(0x0102_0408_1020_4080)
        );
        assert_eq!(
            masks().diagonal_up(Square::H1),
            Bitboard::from(Square::H1)
        );
        for sq in Bitboard::ALL {
            assert!(masks().diagonal_up(sq).contains(sq));
            assert!(masks().diagonal_down(sq).contains(sq));
        }
    }

    #[test]
    /// Test that the half-planes around a square, together with its own file
    /// or rank, cover the board exactly once.
    fn half_planes() {
        for sq in Bitboard::ALL {
            let m = masks();
            assert_eq!(
                m.files_west(sq) | m.file_mask(sq) | m.files_east(sq),
                Bitboard::ALL
            );
            assert!((m.files_west(sq) & m.files_east(sq)).is_empty());
            assert_eq!(
                m.ranks_south(sq) | m.rank_mask(sq) | m.ranks_north(sq),
                Bitboard::ALL
            );
            assert!((m.ranks_south(sq) & m.rank_mask(sq)).is_empty());
        }
        assert!(masks().files_west(Square::A5).is_empty());
        assert_eq!(masks().ranks_north(Square::C7), Bitboard::RANK_8);
    }

    #[test]
    fn neighbour_files() {
        assert_eq!(masks().neighbour_files(Square::A4), Bitboard::FILES[1]);
        assert_eq!(masks().neighbour_files(Square::H4), Bitboard::FILES[6]);
        assert_eq!(
            masks().neighbour_files(Square::D4),
            Bitboard::FILES[2] | Bitboard::FILES[4]
        );
        assert!(masks().file_west(Square::A1).is_empty());
        assert!(masks().file_east(Square::H8).is_empty());
    }

    #[test]
    fn rays() {
        assert_eq!(
            masks().ray(Orientation::North, Square::A1),
            Bitboard::FILE_A & !Bitboard::RANK_1
        );
        assert_eq!(
            masks().ray(Orientation::SouthWest, Square::D4),
            Bitboard::EMPTY
                .with_square(Square::C3)
                .with_square(Square::B2)
                .with_square(Square::A1)
        );
        assert!(masks().ray(Orientation::NorthEast, Square::H4).is_empty());
        for sq in Bitboard::ALL {
            let mut all = Bitboard::EMPTY;
            for o in Orientation::ALL {
                all |= masks().ray(o, sq);
            }
            assert_eq!(all, crate::queen_attacks(sq, Bitboard::EMPTY));
        }
    }

    #[test]
    fn intermediate() {
        let m = masks();
        assert_eq!(
            m.intermediate(Square::A1, Square::A8),
            Bitboard::FILE_A & !Bitboard::RANK_1 & !Bitboard::RANK_8
        );
        assert_eq!(
            m.intermediate(Square::A1, Square::H8),
            Bitboard::new(0x8040_2010_0804_0201)
                & !Bitboard::from(Square::A1)
                & !Bitboard::from(Square::H8)
        );
        assert!(m.intermediate(Square::A1, Square::B3).is_empty());
        assert!(m.intermediate(Square::E4, Square::E4).is_empty());
        assert!(m.intermediate(Square::E4, Square::E5).is_empty());
        for from in Bitboard::ALL {
            for to in Bitboard::ALL {
                assert_eq!(m.intermediate(from, to), m.intermediate(to, from));
            }
        }
    }

    #[test]
    fn passed_pawns() {
        let white = masks().passed_pawn_mask(Color::White, Square::D4);
        let expected = (Bitboard::FILES[2] | Bitboard::FILES[3] | Bitboard::FILES[4])
            & (Bitboard::RANKS[4] | Bitboard::RANKS[5] | Bitboard::RANKS[6] | Bitboard::RANK_8);
        assert_eq!(white, expected);

        let black = masks().passed_pawn_mask(Color::Black, Square::A5);
        let expected = (Bitboard::FILE_A | Bitboard::FILES[1])
            & (Bitboard::RANK_1 | Bitboard::RANKS[1] | Bitboard::RANKS[2] | Bitboard::RANKS[3]);
        assert_eq!(black, expected);

        assert!(masks()
            .passed_pawn_mask(Color::White, Square::E8)
            .is_empty());
        assert!(masks()
            .passed_pawn_mask(Color::Black, Square::E1)
            .is_empty());
    }

    #[test]
    fn castling_rights() {
        assert_eq!(
            masks().castling_rights(Square::E1),
            CastleRights::color_rights(Color::White)
        );
        assert_eq!(masks().castling_rights(Square::E4), CastleRights::NO_RIGHTS);
    }
}
