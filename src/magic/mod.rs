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

//! Magic bitboards, used for generating bishop, rook, and queen attacks.
//!
//! Rather than loading saved magics, the multipliers are found at startup by
//! a seeded random search. Each candidate is verified against every relevant
//! occupancy of its square, and the table filled in while verifying a
//! candidate is the one kept when it succeeds.


use super::{prng::Prng, Bitboard, Direction, Slider, Square};

use log::{debug, trace};
use thiserror::Error;

/// The largest number of relevant occupancies for any square and piece.
/// A rook in a corner has 12 relevant squares.
const MAX_SUBSETS: usize = 1 << 12;

/// Candidates whose product with the mask has fewer than this many bits set
/// in its top byte are discarded without being tried.
const MIN_TOP_BITS: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// One seed for the magic search of each rank.
pub struct SeedTable(pub [u64; 8]);

impl SeedTable {
    /// Seeds which are known to make the search converge quickly.
    pub const DEFAULT: SeedTable =
        SeedTable([728, 10316, 55013, 32803, 12281, 15100, 16645, 255]);

    #[must_use]
    /// Draw a fresh set of nonzero seeds. Tables built from these will be
    /// correct, but their magics will differ from run to run and the search
    /// may be much slower.
    pub fn entropic() -> SeedTable {
        let mut seeds = [0; 8];
        for seed in &mut seeds {
            *seed = fastrand::u64(1..);
        }
        SeedTable(seeds)
    }

    #[inline(always)]
    #[must_use]
    /// Get the seed used for squares on the given rank.
    pub const fn for_rank(&self, rank: usize) -> u64 {
        self.0[rank]
    }
}

impl Default for SeedTable {
    fn default() -> SeedTable {
        SeedTable::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Configuration options for the magic search.
pub struct MagicConfig {
    /// The seeds for the random number generator, one per rank.
    pub seeds: SeedTable,
    /// The number of candidates to try for one square before giving up. If
    /// this is `None`, the search runs until it succeeds.
    pub attempt_limit: Option<u64>,
}

impl MagicConfig {
    #[must_use]
    pub const fn new() -> MagicConfig {
        MagicConfig {
            seeds: SeedTable::DEFAULT,
            attempt_limit: None,
        }
    }
}

impl Default for MagicConfig {
    fn default() -> MagicConfig {
        MagicConfig::new()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
/// The ways in which building a magic table can fail.
pub enum MagicError {
    /// No candidate for one square survived verification within the
    /// configured attempt limit.
    #[error("no {piece} magic found for {square} after {attempts} attempts")]
    Exhausted {
        piece: Slider,
        square: Square,
        attempts: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// All the information needed to look up the attacks of a rook or bishop on
/// one square.
pub struct Magic {
    /// The squares whose occupancy can change the attack set.
    mask: Bitboard,
    /// The magic multiply constant for converting occupancies to indices.
    magic: u64,
    /// The shift to extract an index from a multiplied occupancy.
    shift: u8,
    /// The start of this square's region of the shared attack table.
    offset: usize,
}

impl Magic {
    const EMPTY: Magic = Magic {
        mask: Bitboard::EMPTY,
        magic: 0,
        shift: 64,
        offset: 0,
    };

    #[inline(always)]
    #[must_use]
    pub const fn mask(&self) -> Bitboard {
        self.mask
    }

    #[inline(always)]
    #[must_use]
    pub const fn magic(&self) -> u64 {
        self.magic
    }

    #[inline(always)]
    #[must_use]
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    #[inline(always)]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    #[must_use]
    /// The number of table entries owned by this square.
    pub const fn len(&self) -> usize {
        1 << self.mask.len()
    }

    #[inline(always)]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    /// Hash an occupancy into an index within this square's region.
    /// Squares outside the mask are ignored.
    pub const fn index(&self, occupied: Bitboard) -> usize {
        ((occupied.as_u64() & self.mask.as_u64()).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

#[derive(Clone, Debug)]
/// A complete magic table for one sliding piece.
///
/// Every square owns a contiguous region of one shared table, found at its
/// `Magic`'s offset.
pub struct SlidingAttacks {
    slider: Slider,
    magics: [Magic; 64],
    table: Box<[Bitboard]>,
}

impl SlidingAttacks {
    /// Search for magics for every square and fill in the attack table.
    ///
    /// Squares are visited in order from A1 to H8. Each square's generator
    /// is seeded from the seed table by rank, so the result depends only on
    /// `config.seeds`.
    ///
    /// # Errors
    ///
    /// This function will return an error if `config.attempt_limit` is set and
    /// some square exhausts it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fiddler_tables::{magic::{MagicConfig, SlidingAttacks}, Bitboard, Slider, Square};
    ///
    /// let bishops = SlidingAttacks::new(Slider::Bishop, &MagicConfig::default()).unwrap();
    /// let occupancy = Bitboard::EMPTY.with_square(Square::C3);
    /// assert_eq!(
    ///     bishops.attacks(Square::A1, occupancy),
    ///     Bitboard::EMPTY.with_square(Square::B2).with_square(Square::C3)
    /// );
    /// ```
    pub fn new(slider: Slider, config: &MagicConfig) -> Result<SlidingAttacks, MagicError> {
        let dirs = slider.directions();
        let mut magics = [Magic::EMPTY; 64];

        // size every region up front so the table is allocated exactly once
        let mut size = 0;
        for sq in Bitboard::ALL {
            let mask = relevant_mask(sq, dirs);
            magics[sq as usize] = Magic {
                mask,
                magic: 0,
                shift: 64 - mask.len(),
                offset: size,
            };
            size += magics[sq as usize].len();
        }
        let mut table = vec![Bitboard::EMPTY; size].into_boxed_slice();

        let mut occupancies = vec![Bitboard::EMPTY; MAX_SUBSETS];
        let mut references = vec![Bitboard::EMPTY; MAX_SUBSETS];
        // the attempt during which each slot of a region was last written
        let mut epochs = vec![0u64; MAX_SUBSETS];
        let mut attempt = 0;

        for sq in Bitboard::ALL {
            let entry = &mut magics[sq as usize];

            let mut n_subsets = 0;
            for occupancy in Subsets::new(entry.mask) {
                occupancies[n_subsets] = occupancy;
                references[n_subsets] = sliding_attacks(sq, dirs, occupancy);
                n_subsets += 1;
            }

            let region = &mut table[entry.offset..entry.offset + entry.len()];
            let mut rng = Prng::new(config.seeds.for_rank(sq.rank()));
            let mut tries = 0;
            loop {
                if config.attempt_limit.is_some_and(|limit| tries >= limit) {
                    return Err(MagicError::Exhausted {
                        piece: slider,
                        square: sq,
                        attempts: tries,
                    });
                }
                let candidate = Magic {
                    magic: next_candidate(&mut rng, entry.mask),
                    ..*entry
                };
                tries += 1;
                attempt += 1;
                if try_fill(
                    &candidate,
                    &occupancies[..n_subsets],
                    &references[..n_subsets],
                    region,
                    &mut epochs,
                    attempt,
                ) {
                    entry.magic = candidate.magic;
                    break;
                }
            }
            trace!(
                "{slider} magic for {sq}: {:#018x} ({tries} candidates)",
                entry.magic
            );
        }

        debug!("found {slider} magics after {attempt} candidates; table has {size} entries");

        Ok(SlidingAttacks {
            slider,
            magics,
            table,
        })
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares attacked from `sq` when the board is occupied by
    /// `occupied`.
    pub fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let magic = &self.magics[sq as usize];
        self.table[magic.offset + magic.index(occupied)]
    }

    #[inline(always)]
    #[must_use]
    /// Get the piece these attacks are for.
    pub const fn slider(&self) -> Slider {
        self.slider
    }

    #[inline(always)]
    #[must_use]
    /// Get the magic lookup information for one square.
    pub const fn magic(&self, sq: Square) -> &Magic {
        &self.magics[sq as usize]
    }

    #[must_use]
    /// Get the total number of entries in the shared attack table.
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    /// Get the entries of the shared attack table belonging to `sq`.
    pub fn region(&self, sq: Square) -> &[Bitboard] {
        let magic = &self.magics[sq as usize];
        &self.table[magic.offset..magic.offset + magic.len()]
    }
}

/// Draw random sparse candidates until one is likely enough to spread the
/// masked bits over the index.
fn next_candidate(rng: &mut Prng, mask: Bitboard) -> u64 {
    loop {
        let candidate = rng.sparse_u64();
        if (candidate.wrapping_mul(mask.as_u64()) >> 56).count_ones() >= MIN_TOP_BITS {
            return candidate;
        }
    }
}

/// Try to fill `region` with `candidate`, returning whether every occupancy
/// hashed to a slot that was either unused in this attempt or already held
/// the same attacks.
///
/// A slot counts as unused whenever its epoch is older than `attempt`, so a
/// failed attempt never needs its writes to be undone.
fn try_fill(
    candidate: &Magic,
    occupancies: &[Bitboard],
    references: &[Bitboard],
    region: &mut [Bitboard],
    epochs: &mut [u64],
    attempt: u64,
) -> bool {
    for (&occupancy, &reference) in occupancies.iter().zip(references) {
        let idx = candidate.index(occupancy);
        if epochs[idx] < attempt {
            epochs[idx] = attempt;
            region[idx] = reference;
        } else if region[idx] != reference {
            return false;
        }
    }

    true
}

#[must_use]
/// Create the mask of squares relevant to the attacks of a piece on `sq`
/// moving along `dirs`.
///
/// The last square along each ray is always attacked no matter whether it is
/// occupied, so the board edges are excluded, except for those on the rank and
/// file of `sq` itself.
pub fn relevant_mask(sq: Square, dirs: &[Direction]) -> Bitboard {
    let edges = ((Bitboard::RANK_1 | Bitboard::RANK_8) & !Bitboard::RANKS[sq.rank()])
        | ((Bitboard::FILE_A | Bitboard::FILE_H) & !Bitboard::FILES[sq.file()]);

    sliding_attacks(sq, dirs, Bitboard::EMPTY) & !edges
}

#[must_use]
/// Construct the squares attacked by the pieces at `sq` if it could move along
/// the directions in `dirs`, when the board is occupied by the pieces in
/// `occupied`. The first occupied square along each ray is included.
///
/// This is slow and should only be used for generating magic bitboards and
/// checking them (instead of for move generation).
///
/// # Examples
///
/// ```
/// use fiddler_tables::{magic::sliding_attacks, Bitboard, Direction, Square};
///
/// // squares A3 and B1 are occupied
/// let occupancy = Bitboard::EMPTY
///     .with_square(Square::A3)
///     .with_square(Square::B1);
///
/// // the rook on A1 can see B1, A2, and A3
/// assert_eq!(
///     sliding_attacks(Square::A1, &Direction::ROOK_DIRECTIONS, occupancy),
///     Bitboard::EMPTY
///         .with_square(Square::B1)
///         .with_square(Square::A2)
///         .with_square(Square::A3)
/// );
/// ```
pub fn sliding_attacks(sq: Square, dirs: &[Direction], occupied: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for &dir in dirs {
        let mut current = sq;
        while let Some(next) = current.checked_step(dir) {
            if next.chebyshev_to(current) != 1 {
                // wrapped around the side of the board
                break;
            }
            result.insert(next);
            if occupied.contains(next) {
                break;
            }
            current = next;
        }
    }

    result
}

#[derive(Clone, Debug)]
/// An iterator over every subset of a mask, using the carry-rippler trick.
/// The empty set comes first.
///
/// # Examples
///
/// ```
/// use fiddler_tables::{magic::Subsets, Bitboard};
///
/// let subsets: Vec<Bitboard> = Subsets::new(Bitboard::new(0b101)).collect();
/// assert_eq!(
///     subsets,
///     vec![
///         Bitboard::new(0b000),
///         Bitboard::new(0b001),
///         Bitboard::new(0b100),
///         Bitboard::new(0b101),
///     ]
/// );
/// ```
pub struct Subsets {
    mask: u64,
    next: Option<u64>,
}

impl Subsets {
    #[must_use]
    pub const fn new(mask: Bitboard) -> Subsets {
        Subsets {
            mask: mask.as_u64(),
            next: Some(0),
        }
    }
}

impl Iterator for Subsets {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Bitboard> {
        let current = self.next?;
        let following = current.wrapping_sub(self.mask) & self.mask;
        self.next = if following == 0 { None } else { Some(following) };
        Some(Bitboard::new(current))
    }
}
