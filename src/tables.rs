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

//! The complete set of attack tables and the process-wide instance of them.

use super::{
    magic::{MagicConfig, MagicError, SlidingAttacks},
    masks::Masks,
    steps::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS},
    Bitboard, Color, Piece, Slider, Square,
};

use std::time::Instant;

use log::debug;
use once_cell::sync::Lazy;

/// The attack tables built from the default configuration. They are built on
/// first use.
///
/// # Panics
///
/// Dereferencing this panics if the magic search fails, which cannot happen
/// with the default (unbounded) configuration.
pub static TABLES: Lazy<Tables> = Lazy::new(|| {
    Tables::build(&MagicConfig::default()).unwrap_or_else(|e| panic!("{e}"))
});

#[derive(Clone, Debug)]
/// Attack lookups for every piece and the geometric masks derived from them.
/// Once built, a `Tables` is never modified, so it can be shared freely
/// between threads.
pub struct Tables {
    bishops: SlidingAttacks,
    rooks: SlidingAttacks,
    masks: Masks,
}

impl Tables {
    /// Build the magic tables for both sliding pieces and then the masks.
    ///
    /// # Errors
    ///
    /// This function will return an error if `config` limits the number of
    /// attempts and the search for some square runs out.
    pub fn build(config: &MagicConfig) -> Result<Tables, MagicError> {
        let tic = Instant::now();
        let bishops = SlidingAttacks::new(Slider::Bishop, config)?;
        let rooks = SlidingAttacks::new(Slider::Rook, config)?;
        let masks = Masks::new(&bishops, &rooks);
        debug!("built attack tables in {:?}", tic.elapsed());

        Ok(Tables {
            bishops,
            rooks,
            masks,
        })
    }

    #[must_use]
    /// Get the squares attacked by a piece of type `piece` on `sq`, with the
    /// board occupied by `occupied`.
    ///
    /// Pawn attacks depend on color, so this returns an empty board for
    /// pawns; use `pawn_attacks` for them instead.
    pub fn attacks(&self, piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
        match piece {
            Piece::Bishop => self.bishop_attacks(sq, occupied),
            Piece::Rook => self.rook_attacks(sq, occupied),
            Piece::Queen => self.queen_attacks(sq, occupied),
            Piece::Knight => self.knight_attacks(sq),
            Piece::King => self.king_attacks(sq),
            Piece::Pawn => Bitboard::EMPTY,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishops.attacks(sq, occupied)
    }

    #[inline(always)]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rooks.attacks(sq, occupied)
    }

    #[inline(always)]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupied) | self.rook_attacks(sq, occupied)
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn knight_attacks(&self, sq: Square) -> Bitboard {
        KNIGHT_ATTACKS[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn king_attacks(&self, sq: Square) -> Bitboard {
        KING_ATTACKS[sq as usize]
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::unused_self)]
    /// Get the squares a pawn of the given color on `sq` attacks.
    pub const fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        PAWN_ATTACKS[color as usize][sq as usize]
    }

    #[inline(always)]
    #[must_use]
    pub const fn masks(&self) -> &Masks {
        &self.masks
    }

    #[inline(always)]
    #[must_use]
    /// Get the magic table for one sliding piece.
    pub const fn sliders(&self, slider: Slider) -> &SlidingAttacks {
        match slider {
            Slider::Bishop => &self.bishops,
            Slider::Rook => &self.rooks,
        }
    }
}

#[must_use]
/// Get the squares attacked by `piece` on `sq`, looked up in the global tables.
///
/// # Examples
///
/// ```
/// use fiddler_tables::{attacks, Bitboard, Piece, Square};
///
/// assert_eq!(attacks(Piece::Rook, Square::A1, Bitboard::EMPTY).len(), 14);
/// assert_eq!(attacks(Piece::Knight, Square::A1, Bitboard::ALL).len(), 2);
/// assert!(attacks(Piece::Pawn, Square::E4, Bitboard::EMPTY).is_empty());
/// ```
pub fn attacks(piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
    TABLES.attacks(piece, sq, occupied)
}

#[inline(always)]
#[must_use]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    TABLES.bishop_attacks(sq, occupied)
}

#[inline(always)]
#[must_use]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    TABLES.rook_attacks(sq, occupied)
}

#[inline(always)]
#[must_use]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    TABLES.queen_attacks(sq, occupied)
}

#[inline(always)]
#[must_use]
pub const fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline(always)]
#[must_use]
pub const fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

#[inline(always)]
#[must_use]
pub const fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color as usize][sq as usize]
}

#[inline(always)]
#[must_use]
/// Get the geometric masks from the global tables.
pub fn masks() -> &'static Masks {
    TABLES.masks()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::magic::sliding_attacks;
    use crate::Direction;

    use std::thread;

    #[test]
    /// Test that queen attacks are the union of bishop and rook attacks for
    /// random occupancies.
    fn queen_is_union() {
        let mut rng = fastrand::Rng::with_seed(1729);
        for _ in 0..5_000 {
            let occupancy = Bitboard::new(rng.u64(..));
            let sq = Square::ALL[rng.usize(..64)];
            let mut expected = sliding_attacks(sq, &Direction::ROOK_DIRECTIONS, occupancy);
            expected |= sliding_attacks(sq, &Direction::BISHOP_DIRECTIONS, occupancy);
            assert_eq!(queen_attacks(sq, occupancy), expected);
            assert_eq!(attacks(Piece::Queen, sq, occupancy), expected);
        }
    }

    #[test]
    /// Test that lookups by piece type dispatch to the right table.
    fn dispatch() {
        let occupancy = Bitboard::new(0x0000_1000_0420_0000);
        for sq in Bitboard::ALL {
            assert_eq!(
                attacks(Piece::Bishop, sq, occupancy),
                bishop_attacks(sq, occupancy)
            );
            assert_eq!(attacks(Piece::Rook, sq, occupancy), rook_attacks(sq, occupancy));
            assert_eq!(attacks(Piece::Knight, sq, occupancy), knight_attacks(sq));
            assert_eq!(attacks(Piece::King, sq, occupancy), king_attacks(sq));
            assert_eq!(attacks(Piece::Pawn, sq, occupancy), Bitboard::EMPTY);
            assert_eq!(
                TABLES.pawn_attacks(Color::White, sq),
                pawn_attacks(Color::White, sq)
            );
        }
    }

    #[test]
    /// Test that the global tables are identical to freshly built ones.
    fn global_matches_fresh() {
        let fresh = Tables::build(&MagicConfig::default()).unwrap();
        for slider in Slider::ALL {
            for sq in Bitboard::ALL {
                assert_eq!(
                    fresh.sliders(slider).magic(sq),
                    TABLES.sliders(slider).magic(sq)
                );
                assert_eq!(
                    fresh.sliders(slider).region(sq),
                    TABLES.sliders(slider).region(sq)
                );
            }
        }
    }

    #[test]
    /// Test that the tables can be read from several threads at once.
    fn shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tables>();

        let handles: Vec<_> = Slider::ALL
            .into_iter()
            .map(|slider| {
                thread::spawn(move || {
                    let mut total = 0u32;
                    for sq in Bitboard::ALL {
                        let attacks = TABLES.sliders(slider).attacks(sq, Bitboard::EMPTY);
                        total += u32::from(attacks.len());
                    }
                    total
                })
            })
            .collect();
        let totals: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        // bishops, then rooks
        assert_eq!(totals, vec![560, 64 * 14]);
    }

    #[test]
    fn build_error_propagates() {
        let config = MagicConfig {
            attempt_limit: Some(0),
            ..MagicConfig::default()
        };
        assert!(matches!(
            Tables::build(&config),
            Err(MagicError::Exhausted {
                piece: Slider::Bishop,
                ..
            })
        ));
    }
}
