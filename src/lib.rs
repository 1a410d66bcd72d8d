//! # Quickle Game Server
//!
//! Backend for a daily five-letter word guessing game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      QUICKLE SERVER                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Non-deterministic inputs                  │
//! │  ├── rng.rs      - Seeded Xorshift128+ word picker           │
//! │  └── clock.rs    - Local clock and midnight countdown        │
//! │                                                              │
//! │  game/           - Game logic                                │
//! │  ├── words.rs    - Dictionary loading with fallback          │
//! │  ├── feedback.rs - Two-pass guess scoring                    │
//! │  └── round.rs    - Daily word rotation                       │
//! │                                                              │
//! │  network/        - HTTP layer                                │
//! │  ├── config.rs   - Environment configuration                 │
//! │  ├── protocol.rs - JSON request/response bodies              │
//! │  └── server.rs   - Axum router and server lifecycle          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Daily Word
//!
//! One secret word per server-local calendar day. The first request on a new
//! date picks an unused candidate at random; once every candidate has been
//! used the history is cleared. Rotation and lookup share one lock, so all
//! requests on a given day see the same word.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod network;

// Re-export commonly used types
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::rng::{DeterministicRng, WordPicker};
pub use crate::game::feedback::{compare_guess, is_win, GuessResult, LetterStatus};
pub use crate::game::round::{DailyRound, GuessError, GuessOutcome};
pub use crate::game::words::WordPool;
pub use crate::network::{GameServer, ServerConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Letters per word.
pub const WORD_LENGTH: usize = 5;

/// Guesses allowed per day.
pub const MAX_GUESSES: u32 = 6;

/// Most frequent words eligible to become the daily word.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 5000;
