//! Core primitives.
//!
//! Randomness and time are the only non-deterministic inputs to the game.
//! Both sit behind traits so the round logic can be driven from tests.

pub mod clock;
pub mod rng;

// Re-export core types
pub use clock::{seconds_until_midnight, Clock, ManualClock, SystemClock, SECONDS_PER_DAY};
pub use rng::{derive_server_seed, seed_fingerprint, DeterministicRng, WordPicker};
