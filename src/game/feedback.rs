//! Guess scoring.
//!
//! Computes the per-letter feedback for a guess against the secret word using
//! the standard two-pass rules: exact matches first, then misplaced letters,
//! with each target letter usable at most once.

use serde::{Serialize, Deserialize};

use crate::WORD_LENGTH;

/// Feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    /// Letter not in the word (or all its occurrences already credited).
    Absent,
    /// Letter in the word but at another position.
    Present,
    /// Letter at the right position.
    Correct,
}

/// Feedback for a complete guess, aligned with the guessed letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuessResult(pub [LetterStatus; WORD_LENGTH]);

impl GuessResult {
    /// All positions correct.
    pub const ALL_CORRECT: Self = Self([LetterStatus::Correct; WORD_LENGTH]);

    /// True iff every position is correct.
    pub fn is_win(&self) -> bool {
        is_win(self)
    }
}

/// Score `guess` against `target`.
///
/// Both words are compared case-insensitively. Callers must validate that the
/// guess has exactly [`WORD_LENGTH`] letters; positions missing from a short
/// input score as absent.
///
/// # Example
///
/// ```
/// use quickle::game::feedback::{compare_guess, LetterStatus::*};
///
/// let result = compare_guess("ROOMS", "ROBOT");
/// assert_eq!(result.0, [Correct, Correct, Present, Absent, Absent]);
/// ```
pub fn compare_guess(guess: &str, target: &str) -> GuessResult {
    let mut guess_letters = to_letters(guess);
    let mut target_letters = to_letters(target);
    let mut statuses = [LetterStatus::Absent; WORD_LENGTH];

    // Pass 1: exact matches consume both letters.
    for i in 0..WORD_LENGTH {
        if guess_letters[i].is_some() && guess_letters[i] == target_letters[i] {
            statuses[i] = LetterStatus::Correct;
            guess_letters[i] = None;
            target_letters[i] = None;
        }
    }

    // Pass 2: misplaced letters consume the leftmost unconsumed occurrence.
    for i in 0..WORD_LENGTH {
        let Some(letter) = guess_letters[i] else {
            continue;
        };
        if let Some(j) = target_letters.iter().position(|&t| t == Some(letter)) {
            statuses[i] = LetterStatus::Present;
            target_letters[j] = None;
        }
    }

    GuessResult(statuses)
}

/// True iff every status is [`LetterStatus::Correct`].
pub fn is_win(result: &GuessResult) -> bool {
    result.0.iter().all(|&s| s == LetterStatus::Correct)
}

fn to_letters(word: &str) -> [Option<char>; WORD_LENGTH] {
    let mut letters = [None; WORD_LENGTH];
    for (slot, c) in letters.iter_mut().zip(word.chars().flat_map(char::to_uppercase)) {
        *slot = Some(c);
    }
    letters
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterStatus::*;

    #[test]
    fn test_exact_match_is_win() {
        let result = compare_guess("CRANE", "CRANE");
        assert_eq!(result, GuessResult::ALL_CORRECT);
        assert!(is_win(&result));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(compare_guess("robot", "ROBOT").is_win());
        assert!(compare_guess("RoBoT", "robot").is_win());
    }

    #[test]
    fn test_repeated_letter_capped_by_target() {
        // Second O has one remaining O after position 1 is matched exactly.
        let result = compare_guess("ROOMS", "ROBOT");
        assert_eq!(result.0, [Correct, Correct, Present, Absent, Absent]);
    }

    #[test]
    fn test_more_repeats_than_target() {
        // Three Ls in the guess, two in the target: one exact, one present.
        let result = compare_guess("LOLLY", "ALLOY");
        assert_eq!(result.0, [Present, Present, Correct, Absent, Correct]);
    }

    #[test]
    fn test_exact_match_takes_priority_over_earlier_present() {
        // The E at position 4 is exact, so the leading Es get nothing.
        let result = compare_guess("EERIE", "CRANE");
        assert_eq!(result.0, [Absent, Absent, Present, Absent, Correct]);
    }

    #[test]
    fn test_present_consumes_leftmost() {
        let result = compare_guess("SPEED", "ABIDE");
        assert_eq!(result.0, [Absent, Absent, Present, Absent, Present]);
    }

    #[test]
    fn test_no_overlap() {
        let result = compare_guess("QUICK", "HOUSE");
        assert_eq!(result.0, [Absent, Present, Absent, Absent, Absent]);
        assert!(!result.is_win());
    }

    #[test]
    fn test_short_input_scores_absent() {
        let result = compare_guess("ROB", "ROBOT");
        assert_eq!(result.0, [Correct, Correct, Correct, Absent, Absent]);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&Present).unwrap(), "\"present\"");
        let json = serde_json::to_string(&compare_guess("ROOMS", "ROBOT")).unwrap();
        assert_eq!(json, r#"["correct","correct","present","absent","absent"]"#);
    }
}
