/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// A deterministic xorshift64 pseudo-random number generator.
///
/// Used to fill Zobrist tables. The fixed default seed makes hashes stable
/// across runs, which keeps logged keys comparable between sessions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Xorshift(u64);

impl Xorshift {
    /// Creates a generator with the default seed.
    #[inline(always)]
    pub const fn new() -> Self {
        Self(0x246C_CB2D_3B40_2853)
    }

    /// Generates the next pseudo-random `u64`.
    #[inline(always)]
    pub const fn get_next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

impl Default for Xorshift {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let mut a = Xorshift::new();
        let mut b = Xorshift::new();
        for _ in 0..64 {
            assert_eq!(a.get_next(), b.get_next());
        }
    }

    #[test]
    fn test_nonzero_stream() {
        let mut prng = Xorshift::new();
        for _ in 0..1024 {
            assert_ne!(prng.get_next(), 0);
        }
    }
}
