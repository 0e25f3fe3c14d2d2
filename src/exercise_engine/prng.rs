//! Seeded pseudo-random source shared by every generator.
//!
//! The whole correction protocol depends on this module being bit-exact: a
//! stateless server re-derives an exercise from `(seed, parameters)` and
//! grades against it, so two implementations that disagree on a single draw
//! grade against different exercises. The constants and the string-seed hash
//! below are therefore part of the wire contract and must not be changed
//! without bumping every generator version.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Opaque reproducibility token supplied by the caller on every request.
///
/// Never stored server-side: the caller keeps it and presents it again at
/// correction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Entero(u64),
    Texto(String),
}

impl Seed {
    /// Reduce the seed to the initial 32-bit LCG state.
    ///
    /// Numeric seeds are taken mod 2^32. Text seeds are folded with the
    /// classic 31x rolling hash over UTF-16 code units, computed with
    /// wrapping 32-bit arithmetic (`h = (h << 5) - h + unit`), then
    /// reinterpreted as unsigned.
    fn initial_state(&self) -> u32 {
        match self {
            Seed::Entero(n) => *n as u32,
            Seed::Texto(s) => {
                let mut h: i32 = 0;
                for unit in s.encode_utf16() {
                    h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
                }
                h as u32
            }
        }
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Entero(n)
    }
}

impl From<u32> for Seed {
    fn from(n: u32) -> Self {
        Seed::Entero(u64::from(n))
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Texto(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Texto(s)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Entero(n) => write!(f, "{n}"),
            Seed::Texto(s) => write!(f, "{s}"),
        }
    }
}

/// 32-bit linear congruential generator.
///
/// Step: `state = state * 1664525 + 1013904223 (mod 2^32)`. Statistical
/// variety is all this needs to provide; it is deliberately not a CSPRNG.
/// One instance is derived per generation call and discarded afterwards —
/// never share an instance across calls.
#[derive(Debug, Clone)]
pub struct SeededPrng {
    state: u32,
}

impl SeededPrng {
    pub fn new(seed: &Seed) -> Self {
        SeededPrng {
            state: seed.initial_state(),
        }
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform float in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    ///
    /// Precondition: `min <= max`. Violating it is a caller bug; debug builds
    /// panic, release builds consume the single draw and return `min` so the
    /// replay stream stays aligned.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "SeededPrng::int requiere min <= max (min={min}, max={max})");
        let draw = self.next();
        if min > max {
            return min;
        }
        // Span arithmetic in i128: the full i64 range does not fit in i64.
        let span = (i128::from(max) - i128::from(min) + 1) as f64;
        let offset = (draw * span).floor() as i128;
        (i128::from(min) + offset).clamp(i128::from(min), i128::from(max)) as i64
    }

    /// Fisher-Yates shuffle on a copy; the input is never mutated.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = self.int(0, i as i64) as usize;
            out.swap(i, j);
        }
        out
    }

    /// Draw `min(k, len)` distinct items: shuffle, then take the prefix.
    pub fn sample<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T> {
        let mut out = self.shuffle(items);
        out.truncate(k.min(items.len()));
        out
    }
}

/// Interop with the rand ecosystem (range helpers, distributions).
///
/// `next_u32` exposes the raw post-step state, which is how exercise ids are
/// minted. Draws made through rand's own distributions are *not* covered by
/// the replay contract — generators must stick to `next`/`int`/`shuffle`/
/// `sample` for anything that ends up in an exercise.
impl RngCore for SeededPrng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.step()) << 32) | u64::from(self.step())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.step().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_constants_are_pinned() {
        // First states from a zero seed. These values are the contract.
        let mut rng = SeededPrng::new(&Seed::Entero(0));
        assert_eq!(rng.step(), 1_013_904_223);
        assert_eq!(rng.step(), 1_196_435_762);
        assert_eq!(rng.step(), 3_519_870_697);
        assert_eq!(rng.step(), 2_868_466_484);
    }

    #[test]
    fn next_is_state_over_two_pow_32() {
        let mut rng = SeededPrng::new(&Seed::Entero(0));
        assert_eq!(rng.next(), 1_013_904_223.0 / 4_294_967_296.0);
    }

    #[test]
    fn string_seed_hash_is_pinned() {
        // hash("basic-seed") folds to 3124791472; first step from there.
        let mut rng = SeededPrng::new(&Seed::from("basic-seed"));
        assert_eq!(rng.step(), 3_244_033_103);

        let mut rng = SeededPrng::new(&Seed::from("math-seed"));
        assert_eq!(rng.step(), 1_667_395_197);
    }

    #[test]
    fn numeric_seed_wraps_mod_two_pow_32() {
        let a = SeededPrng::new(&Seed::Entero(7)).step();
        let b = SeededPrng::new(&Seed::Entero(7 + (1u64 << 32))).step();
        assert_eq!(a, b);
    }

    #[test]
    fn int_sequence_is_pinned() {
        let mut rng = SeededPrng::new(&Seed::Entero(42));
        let drawn: Vec<i64> = (0..8).map(|_| rng.int(1, 10)).collect();
        assert_eq!(drawn, vec![3, 1, 6, 3, 4, 1, 5, 2]);
    }

    #[test]
    fn int_is_inclusive_on_both_ends() {
        let mut rng = SeededPrng::new(&Seed::Entero(9));
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let v = rng.int(0, 3);
            assert!((0..=3).contains(&v));
            seen_min |= v == 0;
            seen_max |= v == 3;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn extreme_spans_stay_in_bounds_without_overflow() {
        let mut rng = SeededPrng::new(&Seed::Entero(1));
        let bajo = -(1i64 << 62);
        let alto = 1i64 << 62;
        for _ in 0..8 {
            let v = rng.int(bajo, alto);
            assert!((bajo..=alto).contains(&v));
        }
        // The widest possible request is still a single aligned draw.
        let mut a = SeededPrng::new(&Seed::Entero(2));
        let mut b = SeededPrng::new(&Seed::Entero(2));
        let _ = a.int(i64::MIN, i64::MAX);
        b.next();
        assert_eq!(a.next(), b.next());
    }

    #[test]
    fn degenerate_range_still_consumes_one_draw() {
        let mut a = SeededPrng::new(&Seed::Entero(5));
        let mut b = SeededPrng::new(&Seed::Entero(5));
        assert_eq!(a.int(7, 7), 7);
        b.next();
        assert_eq!(a.next(), b.next());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SeededPrng::new(&Seed::from("shuffle"));
        let input: Vec<u32> = (0..20).collect();
        let mut out = rng.shuffle(&input);
        assert_eq!(out.len(), input.len());
        out.sort_unstable();
        assert_eq!(out, input);
    }

    #[test]
    fn sample_takes_distinct_prefix() {
        let mut rng = SeededPrng::new(&Seed::from("sample"));
        let input: Vec<u32> = (0..10).collect();
        let picked = rng.sample(&input, 4);
        assert_eq!(picked.len(), 4);
        let mut dedup = picked.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), 4);

        // Oversampling clamps to the pool size.
        let mut rng = SeededPrng::new(&Seed::from("sample"));
        assert_eq!(rng.sample(&input, 99).len(), input.len());
    }

    #[test]
    fn rng_core_words_match_raw_states() {
        let mut via_trait = SeededPrng::new(&Seed::Entero(0));
        assert_eq!(RngCore::next_u32(&mut via_trait), 1_013_904_223);
        assert_eq!(
            RngCore::next_u64(&mut via_trait),
            (1_196_435_762u64 << 32) | 3_519_870_697u64
        );
    }
}
