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

//! A small, seedable pseudo-random number generator.
//!
//! This is the xorshift64* generator by Sebastiano Vigna. Magic generation
//! depends on it producing the exact same stream for the same seed, so the
//! recurrence and multiplier must never change.

#[derive(Clone, Debug, PartialEq, Eq)]
/// An xorshift64* generator. Its state is a single nonzero 64-bit integer.
pub struct Prng(u64);

impl Prng {
    /// The multiplier applied to the state to produce each output.
    const MULTIPLIER: u64 = 2_685_821_657_736_338_717;

    #[must_use]
    /// Create a new generator from `seed`.
    ///
    /// `seed` must be nonzero: a zero state would only ever produce zeros.
    pub fn new(seed: u64) -> Prng {
        debug_assert_ne!(seed, 0, "xorshift generators cannot be seeded with zero");
        Prng(seed)
    }

    #[inline(always)]
    /// Draw the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(Prng::MULTIPLIER)
    }

    #[inline(always)]
    /// Draw a value with only about one eighth of its bits set, by
    /// intersecting three draws.
    pub fn sparse_u64(&mut self) -> u64 {
        self.next_u64() & self.next_u64() & self.next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test the generator against precomputed outputs.
    fn known_sequence() {
        let mut rng = Prng::new(1);
        assert_eq!(rng.next_u64(), 0x47e4_ce4b_896c_dd1d);
        assert_eq!(rng.next_u64(), 0xabcf_a6a8_e079_651d);

        let mut rng = Prng::new(728);
        assert_eq!(rng.next_u64(), 0x03b3_62a3_ea81_3c76);
        assert_eq!(rng.next_u64(), 0xe36c_a1f6_cac6_d897);
        assert_eq!(rng.next_u64(), 0x3f57_a94c_2791_2b84);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Prng::new(12345);
        let mut b = Prng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    /// Test that sparse draws are the intersection of three plain draws.
    fn sparse_is_intersection() {
        let mut plain = Prng::new(55013);
        let mut sparse = plain.clone();
        let expected = plain.next_u64() & plain.next_u64() & plain.next_u64();
        assert_eq!(sparse.sparse_u64(), expected);
    }

    #[test]
    /// Test that sparse draws really are sparse.
    fn sparse_distribution() {
        let mut rng = Prng::new(10316);
        let mut regular_bits = 0;
        let mut sparse_bits = 0;
        for _ in 0..1000 {
            regular_bits += rng.next_u64().count_ones();
            sparse_bits += rng.sparse_u64().count_ones();
        }
        assert!(sparse_bits < regular_bits / 2);
    }
}
