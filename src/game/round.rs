//! Daily Round Management
//!
//! Owns the secret word for the current calendar day and rotates it when the
//! date changes. All reads and rotations of [`RoundState`] go through one
//! mutex, so concurrent requests that straddle midnight agree on the word.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::clock::{seconds_until_midnight, Clock};
use crate::core::rng::WordPicker;
use crate::game::feedback::{compare_guess, GuessResult};
use crate::game::words::WordPool;
use crate::WORD_LENGTH;

/// Rotation state for the daily word.
#[derive(Debug, Clone, Default)]
pub struct RoundState {
    /// Date the secret word belongs to.
    current_date: Option<NaiveDate>,
    /// Today's word; `None` until first requested.
    secret_word: Option<String>,
    /// Words already used on earlier days.
    used_words: BTreeSet<String>,
}

/// What a rotation did, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    /// Date the new word is valid for.
    pub date: NaiveDate,
    /// The new secret word.
    pub word: String,
    /// Unused candidates left after this pick.
    pub remaining: usize,
    /// Whether the used-word history was cleared first.
    pub recycled: bool,
}

impl RoundState {
    /// Empty state; the first lookup rotates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Date of the current secret word.
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    /// Current secret word, if one has been chosen.
    pub fn secret_word(&self) -> Option<&str> {
        self.secret_word.as_deref()
    }

    /// Words chosen on past days (including today's).
    pub fn used_words(&self) -> &BTreeSet<String> {
        &self.used_words
    }

    /// Whether `today` needs a new word.
    pub fn needs_rotation(&self, today: NaiveDate) -> bool {
        self.secret_word.is_none() || self.current_date != Some(today)
    }

    /// Pick a new word for `today` from candidates not used yet.
    ///
    /// When every candidate has been used the history is cleared and the
    /// full list is available again. `pool` must have at least one candidate.
    pub fn rotate(&mut self, today: NaiveDate, pool: &WordPool, picker: &mut dyn WordPicker) -> Rotation {
        let mut available: Vec<&String> = pool
            .candidates()
            .iter()
            .filter(|w| !self.used_words.contains(w.as_str()))
            .collect();

        let recycled = available.is_empty();
        if recycled {
            self.used_words.clear();
            available = pool.candidates().iter().collect();
        }

        let idx = picker.pick_index(available.len()).min(available.len() - 1);
        let word = available[idx].clone();
        let remaining = available.len() - 1;

        self.used_words.insert(word.clone());
        self.secret_word = Some(word.clone());
        self.current_date = Some(today);

        Rotation {
            date: today,
            word,
            remaining,
            recycled,
        }
    }
}

/// Guess rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// Guess is not exactly five characters.
    #[error("Invalid guess length.")]
    InvalidLength {
        /// Characters received.
        length: usize,
    },

    /// Guess is not in the accepted-guess set.
    #[error("Word not found in dictionary.")]
    NotInDictionary {
        /// The uppercased guess.
        word: String,
    },
}

/// Scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// Per-letter feedback.
    pub statuses: GuessResult,
    /// Whether the guess is the secret word.
    pub is_correct: bool,
}

struct RoundInner {
    state: RoundState,
    picker: Box<dyn WordPicker>,
}

/// Daily round manager shared by all request handlers.
pub struct DailyRound {
    pool: Arc<WordPool>,
    clock: Arc<dyn Clock>,
    inner: Mutex<RoundInner>,
}

impl DailyRound {
    /// Create a manager with empty state.
    ///
    /// `pool` must contain at least one candidate; [`WordPool`] constructors
    /// guarantee this.
    pub fn new(pool: Arc<WordPool>, picker: Box<dyn WordPicker>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            inner: Mutex::new(RoundInner {
                state: RoundState::new(),
                picker,
            }),
        }
    }

    /// The vocabulary in use.
    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    /// Today's secret word, rotating first if the date has changed.
    pub async fn daily_word(&self) -> String {
        let mut inner = self.inner.lock().await;
        // Read the date under the lock; a date read before waiting can be a
        // day behind the request that rotated ahead of us.
        let today = self.clock.today();
        let RoundInner { state, picker } = &mut *inner;

        if state.needs_rotation(today) {
            let rotation = state.rotate(today, &self.pool, picker.as_mut());
            if rotation.recycled {
                info!("All {} candidate words used, starting over", self.pool.candidate_count());
            }
            info!("New daily word for {} ({} unused candidates left)", rotation.date, rotation.remaining);
            debug!(word = %rotation.word, "daily word selected");
            #[cfg(feature = "debug-tracing")]
            info!("Daily word: {}", rotation.word);
        }

        // needs_rotation is false here, so a word is set.
        state.secret_word().unwrap_or_default().to_string()
    }

    /// Validate a guess and score it against today's word.
    pub async fn submit_guess(&self, guess: &str) -> Result<GuessOutcome, GuessError> {
        let length = guess.chars().count();
        if length != WORD_LENGTH {
            return Err(GuessError::InvalidLength { length });
        }

        let guess = guess.to_uppercase();
        if !self.pool.is_accepted(&guess) {
            return Err(GuessError::NotInDictionary { word: guess });
        }

        let target = self.daily_word().await;
        let statuses = compare_guess(&guess, &target);

        Ok(GuessOutcome {
            is_correct: statuses.is_win(),
            statuses,
        })
    }

    /// Seconds until the word rotates at local midnight.
    pub fn seconds_until_reset(&self) -> u64 {
        seconds_until_midnight(self.clock.now())
    }

    /// Snapshot of the rotation state.
    pub async fn state(&self) -> RoundState {
        self.inner.lock().await.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::rng::DeterministicRng;
    use chrono::{Duration, NaiveDateTime};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Always picks the first available word.
    struct FirstPicker;

    impl WordPicker for FirstPicker {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    struct StdRngPicker(StdRng);

    impl WordPicker for StdRngPicker {
        fn pick_index(&mut self, len: usize) -> usize {
            self.0.gen_range(0..len)
        }
    }

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        date(day).and_hms_opt(h, m, s).unwrap()
    }

    fn three_word_pool() -> Arc<WordPool> {
        Arc::new(WordPool::from_ranked(["crane", "slate", "trace", "zebra"], 3).unwrap())
    }

    fn round_with(picker: Box<dyn WordPicker>, clock: Arc<ManualClock>) -> DailyRound {
        DailyRound::new(three_word_pool(), picker, clock)
    }

    #[test]
    fn test_rotate_picks_unused_in_candidate_order() {
        let pool = three_word_pool();
        let mut state = RoundState::new();
        let mut picker = FirstPicker;

        assert!(state.needs_rotation(date(1)));

        let first = state.rotate(date(1), &pool, &mut picker);
        assert_eq!(first.word, "CRANE");
        assert_eq!(first.remaining, 2);
        assert!(!state.needs_rotation(date(1)));

        let second = state.rotate(date(2), &pool, &mut picker);
        assert_eq!(second.word, "SLATE");

        let third = state.rotate(date(3), &pool, &mut picker);
        assert_eq!(third.word, "TRACE");
        assert_eq!(third.remaining, 0);
        assert!(!third.recycled);
        assert_eq!(state.used_words().len(), 3);
    }

    #[test]
    fn test_exhaustion_clears_history() {
        let pool = three_word_pool();
        let mut state = RoundState::new();
        let mut picker = FirstPicker;

        for day in 1..=3 {
            state.rotate(date(day), &pool, &mut picker);
        }

        let fourth = state.rotate(date(4), &pool, &mut picker);
        assert!(fourth.recycled);
        assert_eq!(fourth.word, "CRANE");
        assert_eq!(state.used_words().len(), 1);
        assert_eq!(state.current_date(), Some(date(4)));
    }

    #[test]
    fn test_never_repeats_before_exhaustion() {
        let pool = Arc::new(
            WordPool::from_ranked(["about", "other", "which", "there", "their", "would"], 100).unwrap(),
        );
        let mut state = RoundState::new();
        let mut picker = DeterministicRng::new(7);

        for day in 1..=6 {
            let before = state.used_words().clone();
            let rotation = state.rotate(date(day), &pool, &mut picker);
            assert!(!before.contains(&rotation.word));
            assert!(pool.is_candidate(&rotation.word));
        }
        assert_eq!(state.used_words().len(), 6);
    }

    #[test]
    fn test_out_of_range_picker_is_clamped() {
        struct HugePicker;
        impl WordPicker for HugePicker {
            fn pick_index(&mut self, _len: usize) -> usize {
                usize::MAX
            }
        }

        let pool = three_word_pool();
        let mut state = RoundState::new();
        let rotation = state.rotate(date(1), &pool, &mut HugePicker);
        assert_eq!(rotation.word, "TRACE");
    }

    #[tokio::test]
    async fn test_same_day_same_word() {
        let clock = Arc::new(ManualClock::new(noon(1)));
        let round = round_with(Box::new(DeterministicRng::new(3)), clock.clone());

        let first = round.daily_word().await;
        clock.advance(Duration::hours(11));
        let second = round.daily_word().await;

        assert_eq!(first, second);
        assert_eq!(round.state().await.used_words().len(), 1);
    }

    #[tokio::test]
    async fn test_rotates_after_midnight() {
        let clock = Arc::new(ManualClock::new(noon(1)));
        let round = round_with(Box::new(FirstPicker), clock.clone());

        assert_eq!(round.daily_word().await, "CRANE");

        clock.set(noon(2));
        assert_eq!(round.daily_word().await, "SLATE");

        let state = round.state().await;
        assert_eq!(state.current_date(), Some(date(2)));
        assert_eq!(state.secret_word(), Some("SLATE"));
    }

    #[tokio::test]
    async fn test_external_rng_picker() {
        let clock = Arc::new(ManualClock::new(noon(1)));
        let round = round_with(Box::new(StdRngPicker(StdRng::seed_from_u64(11))), clock.clone());

        let mut seen = BTreeSet::new();
        for day in 1..=3 {
            clock.set(noon(day));
            seen.insert(round.daily_word().await);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_requests_agree() {
        let clock = Arc::new(ManualClock::new(noon(1)));
        let round = Arc::new(round_with(Box::new(DeterministicRng::new(99)), clock));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let round = round.clone();
                tokio::spawn(async move { round.daily_word().await })
            })
            .collect();

        let mut words = BTreeSet::new();
        for handle in handles {
            words.insert(handle.await.unwrap());
        }

        assert_eq!(words.len(), 1);
        assert_eq!(round.state().await.used_words().len(), 1);
    }

    #[tokio::test]
    async fn test_request_waiting_across_midnight_sees_new_day() {
        let clock = Arc::new(ManualClock::new(at(1, 23, 59, 58)));
        let round = Arc::new(round_with(Box::new(FirstPicker), clock.clone()));
        assert_eq!(round.daily_word().await, "CRANE");

        // A arrives at 23:59:59 but has to wait for the lock.
        clock.set(at(1, 23, 59, 59));
        let held = round.inner.lock().await;
        let a = tokio::spawn({
            let round = round.clone();
            async move { round.daily_word().await }
        });
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        // Midnight passes before A gets the lock; B queues behind it.
        clock.set(at(2, 0, 0, 1));
        let b = tokio::spawn({
            let round = round.clone();
            async move { round.daily_word().await }
        });
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        drop(held);

        let a = a.await.unwrap();
        let b = b.await.unwrap();
        let c = round.daily_word().await;

        assert_eq!(a, "SLATE");
        assert_eq!(a, b);
        assert_eq!(b, c);

        let state = round.state().await;
        assert_eq!(state.current_date(), Some(date(2)));
        assert_eq!(state.used_words().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_guess_validation() {
        let clock = Arc::new(ManualClock::new(noon(1)));
        let round = round_with(Box::new(FirstPicker), clock);

        assert_eq!(
            round.submit_guess("CRAN").await,
            Err(GuessError::InvalidLength { length: 4 })
        );
        assert_eq!(
            round.submit_guess("cranes").await,
            Err(GuessError::InvalidLength { length: 6 })
        );
        assert_eq!(
            round.submit_guess("QUICK").await,
            Err(GuessError::NotInDictionary { word: "QUICK".to_string() })
        );

        // Rejected guesses never trigger a rotation.
        assert!(round.state().await.secret_word().is_none());
    }

    #[tokio::test]
    async fn test_submit_guess_scores_against_daily_word() {
        let clock = Arc::new(ManualClock::new(noon(1)));
        let round = round_with(Box::new(FirstPicker), clock);

        let miss = round.submit_guess("trace").await.unwrap();
        assert!(!miss.is_correct);
        assert_eq!(miss.statuses, compare_guess("TRACE", "CRANE"));

        // Accepted but not a candidate.
        let zebra = round.submit_guess("ZEBRA").await.unwrap();
        assert!(!zebra.is_correct);

        let hit = round.submit_guess("Crane").await.unwrap();
        assert!(hit.is_correct);
        assert_eq!(hit.statuses, GuessResult::ALL_CORRECT);
    }

    #[test]
    fn test_seconds_until_reset_uses_clock() {
        let clock = Arc::new(ManualClock::new(noon(1)));
        let round = round_with(Box::new(FirstPicker), clock.clone());

        assert_eq!(round.seconds_until_reset(), 43_200);
        clock.advance(Duration::seconds(5));
        assert_eq!(round.seconds_until_reset(), 43_195);
    }
}
