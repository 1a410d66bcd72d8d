//! Protocol Messages
//!
//! JSON bodies for the HTTP API. Field names follow the frontend's
//! snake_case contract and must not change.

use serde::{Serialize, Deserialize};

use crate::game::feedback::GuessResult;
use crate::game::round::GuessOutcome;

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /api/wordle/guess`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuessRequest {
    /// The guessed word, any case.
    #[serde(default)]
    pub guess: Option<String>,
}

/// Query of `GET /api/user/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsQuery {
    /// Caller's user id; `0` or absent means anonymous.
    #[serde(default)]
    pub user_id: Option<i64>,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Body of `GET /api/wordle/daily-word`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWordResponse {
    /// Letters per word.
    pub word_length: usize,
    /// Guesses allowed per day.
    pub max_guesses: u32,
    /// Secret word, only when the server is configured to reveal it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

/// Body of `POST /api/wordle/guess` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// One of `absent`, `present`, `correct` per letter.
    pub status_array: GuessResult,
    /// Whether the guess was the secret word.
    pub is_correct: bool,
}

impl From<GuessOutcome> for GuessResponse {
    fn from(outcome: GuessOutcome) -> Self {
        Self {
            status_array: outcome.statuses,
            is_correct: outcome.is_correct,
        }
    }
}

/// Body of `GET /api/wordle/next-reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextResetResponse {
    /// Whole seconds until local midnight.
    pub time_remaining_seconds: u64,
}

/// Body of `GET /api/user/stats`.
///
/// Statistics are not tracked yet; every caller sees the same numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsResponse {
    /// Games played.
    pub times_played: u32,
    /// Current win streak.
    pub streak: u32,
    /// Longest win streak.
    pub max_streak: u32,
    /// Percentage of games won.
    pub win_percentage: f64,
    /// Whether the request identified a user.
    pub is_logged_in: bool,
}

impl UserStatsResponse {
    /// Placeholder stats for the given caller.
    pub fn placeholder(user_id: Option<i64>) -> Self {
        Self {
            times_played: 15,
            streak: 5,
            max_streak: 8,
            win_percentage: 60.0,
            is_logged_in: matches!(user_id, Some(id) if id != 0),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub detail: String,
}
