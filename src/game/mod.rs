//! Game logic.
//!
//! - `words`: vocabulary loading with fallback
//! - `feedback`: guess scoring
//! - `round`: daily word rotation and guess submission

pub mod feedback;
pub mod round;
pub mod words;

pub use feedback::{compare_guess, is_win, GuessResult, LetterStatus};
pub use round::{DailyRound, GuessError, GuessOutcome, RoundState, Rotation};
pub use words::{load_word_pool, LoadedPool, PoolOrigin, WordPool, WordSourceError, FALLBACK_WORDS};
