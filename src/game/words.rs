//! Word Source
//!
//! Loads the frequency-ranked dictionary once at startup and derives the
//! accepted-guess set and the candidate list for daily words. Loading never
//! fails outright: any problem falls back to a tiny built-in list so the
//! server stays playable.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::WORD_LENGTH;

/// Words used when the dictionary cannot be loaded.
pub const FALLBACK_WORDS: [&str; 6] = ["QUICK", "LEAVE", "TRAIN", "APPLE", "HOUSE", "POINT"];

/// Word list loading errors.
#[derive(Debug, Error)]
pub enum WordSourceError {
    /// No dictionary path configured.
    #[error("no word list configured")]
    NotConfigured,

    /// Dictionary file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Dictionary contained no usable five-letter words.
    #[error("word list has no five-letter words")]
    Empty,
}

/// Immutable vocabulary for the game.
#[derive(Debug, Clone)]
pub struct WordPool {
    /// Daily word candidates, most frequent first.
    candidates: Vec<String>,
    /// Every word a player may guess.
    accepted: BTreeSet<String>,
}

impl WordPool {
    /// Build a pool from words ordered most-frequent first.
    ///
    /// Keeps alphabetic words of exactly [`WORD_LENGTH`] characters,
    /// uppercased, dropping later duplicates. The first `candidate_limit`
    /// survivors become daily word candidates.
    pub fn from_ranked<I, S>(ranked: I, candidate_limit: usize) -> Result<Self, WordSourceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = BTreeSet::new();
        let mut ordered = Vec::new();

        for word in ranked {
            let word = word.as_ref().trim();
            if word.chars().count() != WORD_LENGTH || !word.chars().all(char::is_alphabetic) {
                continue;
            }
            let upper = word.to_uppercase();
            // Uppercasing can expand some letters (e.g. ß -> SS).
            if upper.chars().count() != WORD_LENGTH {
                continue;
            }
            if accepted.insert(upper.clone()) {
                ordered.push(upper);
            }
        }

        if ordered.is_empty() {
            return Err(WordSourceError::Empty);
        }

        ordered.truncate(candidate_limit.max(1));

        Ok(Self {
            candidates: ordered,
            accepted,
        })
    }

    /// Parse a ranked dictionary file.
    ///
    /// One entry per line, most frequent first. Anything after the first
    /// whitespace (e.g. a count column) is ignored, as are blank lines and
    /// `#` comments.
    pub fn load(path: &Path, candidate_limit: usize) -> Result<Self, WordSourceError> {
        let content = fs::read_to_string(path).map_err(|source| WordSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_whitespace().next());

        Self::from_ranked(words, candidate_limit)
    }

    /// The built-in list, used for both guesses and candidates.
    pub fn fallback() -> Self {
        let candidates: Vec<String> = FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();
        let accepted = candidates.iter().cloned().collect();
        Self {
            candidates,
            accepted,
        }
    }

    /// Daily word candidates in frequency order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Number of candidates.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Number of accepted guesses.
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// Whether an uppercase word may be guessed.
    pub fn is_accepted(&self, word: &str) -> bool {
        self.accepted.contains(word)
    }

    /// Whether an uppercase word may become a daily word.
    pub fn is_candidate(&self, word: &str) -> bool {
        self.candidates.iter().any(|c| c == word)
    }
}

/// Where the active pool came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolOrigin {
    /// Loaded from the ranked dictionary at this path.
    Dictionary(PathBuf),
    /// Built-in list after a load failure.
    Fallback {
        /// Why the dictionary was not used.
        reason: String,
    },
}

/// Outcome of startup word loading.
#[derive(Debug, Clone)]
pub struct LoadedPool {
    /// The vocabulary to serve.
    pub pool: WordPool,
    /// Whether the dictionary or the fallback list is in use.
    pub origin: PoolOrigin,
}

impl LoadedPool {
    /// True when the built-in list is in use.
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, PoolOrigin::Fallback { .. })
    }
}

/// Load the dictionary, falling back to [`FALLBACK_WORDS`] on any failure.
pub fn load_word_pool(path: Option<&Path>, candidate_limit: usize) -> LoadedPool {
    let Some(path) = path else {
        return fallback_pool(WordSourceError::NotConfigured);
    };

    match WordPool::load(path, candidate_limit) {
        Ok(pool) => {
            info!(
                "Loaded word list {}: {} accepted guesses, {} candidates",
                path.display(),
                pool.accepted_count(),
                pool.candidate_count()
            );
            LoadedPool {
                pool,
                origin: PoolOrigin::Dictionary(path.to_path_buf()),
            }
        }
        Err(e) => fallback_pool(e),
    }
}

fn fallback_pool(error: WordSourceError) -> LoadedPool {
    warn!("Word list unavailable ({}), using {} fallback words", error, FALLBACK_WORDS.len());
    LoadedPool {
        pool: WordPool::fallback(),
        origin: PoolOrigin::Fallback {
            reason: error.to_string(),
        },
    }
}
