//! Seeded pseudo-random stream.
//!
//! Every random choice in a generation run is drawn from one
//! [`SeededRng`] expanded from the caller's seed string, so the same
//! seed always reproduces the same plan.
//!
//! # Algorithm
//! - Seed hash: 32-bit FNV-1a over the UTF-16 code units of the string.
//! - Stream: Mulberry32.
//! - Float draws: `next_u32() / 2^32`, in `[0, 1)`.
//!
//! # Reference
//! Fowler, Noll, Vo (1991), FNV hash; Ettinger (2017), Mulberry32.

use rand::RngCore;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// Hashes a seed string to 32 bits (FNV-1a over UTF-16 code units).
pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Mulberry32 generator.
///
/// Implements [`RngCore`], so it can drive any `rand` API; the engine
/// itself only uses [`SeededRng::next_f64`] to keep draws reproducible
/// across implementations.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Creates a generator from a numeric seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Creates a generator from a seed string.
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(hash_seed(seed))
    }

    /// Next raw 32-bit output.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(1 | t);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(61 | r));
        r ^ (r >> 14)
    }

    /// Next float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / 4_294_967_296.0
    }

    /// Uniform index in `[0, bound)`. `bound` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "bound must be non-zero");
        ((self.next_f64() * bound as f64) as usize).min(bound.saturating_sub(1))
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_raw());
        let hi = u64::from(self.next_raw());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Fisher–Yates shuffle driven by the seeded stream.
pub fn shuffle_in_place<T>(items: &mut [T], rng: &mut SeededRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}
