//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ for word selection. Given the same seed the server
//! picks the same sequence of daily words, which makes rotations reproducible
//! in tests and replayable from logs.

use sha2::{Sha256, Digest};

/// Source of randomness for daily word selection.
///
/// The round manager only ever needs a uniform index into the list of
/// still-available candidates, so that is the whole interface. Tests swap in
/// stub pickers to force a specific word.
pub trait WordPicker: Send {
    /// Return an index in `[0, len)`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use quickle::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    ///
    /// Uses rejection sampling so every index is equally likely.
    #[inline]
    pub fn next_below(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        // Largest multiple of max that fits in u64; values above it are biased.
        let zone = u64::MAX - (u64::MAX % max);
        loop {
            let value = self.next_u64();
            if value < zone {
                return value % max;
            }
        }
    }
}

impl WordPicker for DeterministicRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.next_below(len as u64) as usize
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a server seed from startup entropy.
///
/// Used when no explicit seed is configured. The inputs only need to differ
/// between restarts; hashing spreads them over the whole seed space.
///
/// # Parameters
///
/// - `started_at_nanos`: Wall-clock nanoseconds since the Unix epoch
/// - `process_id`: OS process id
pub fn derive_server_seed(started_at_nanos: u128, process_id: u32) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"QUICKLE_ROUND_SEED_V1");
    hasher.update(started_at_nanos.to_le_bytes());
    hasher.update(process_id.to_le_bytes());

    let hash = hasher.finalize();

    // Take first 8 bytes as seed
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(seed)
}

/// Short fingerprint of a seed, safe to log.
pub fn seed_fingerprint(seed: u64) -> String {
    let hash = Sha256::digest(seed.to_le_bytes());
    hex::encode(&hash[..4])
}

// =============================================================================
// TESTS
// =============================================================================
