//! Server configuration.
//!
//! Defaults match a local development setup: the API on port 8000 and the
//! frontend dev server on port 3000.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::DEFAULT_CANDIDATE_LIMIT;

/// Default ranked dictionary shipped with the server.
pub const DEFAULT_WORD_LIST: &str = "data/words_en.txt";

/// Default frontend origins allowed by CORS.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held an unusable value.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Frontend origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
    /// Ranked dictionary path. `None` uses the built-in fallback list.
    pub word_list_path: Option<PathBuf>,
    /// How many of the most frequent words may become daily words.
    pub candidate_limit: usize,
    /// Include the secret word in the daily-word response (demo builds only).
    pub reveal_word: bool,
    /// Fixed RNG seed. Derived from startup entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            word_list_path: Some(PathBuf::from(DEFAULT_WORD_LIST)),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            reveal_word: false,
            rng_seed: None,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `QUICKLE_BIND_ADDR` | `bind_addr` |
    /// | `QUICKLE_ALLOWED_ORIGINS` | `allowed_origins` (comma-separated) |
    /// | `QUICKLE_WORD_LIST` | `word_list_path` (empty disables) |
    /// | `QUICKLE_CANDIDATE_LIMIT` | `candidate_limit` |
    /// | `QUICKLE_REVEAL_WORD` | `reveal_word` |
    /// | `QUICKLE_SEED` | `rng_seed` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("QUICKLE_BIND_ADDR") {
            config.bind_addr = parse_var("QUICKLE_BIND_ADDR", &value)?;
        }

        if let Some(value) = lookup("QUICKLE_ALLOWED_ORIGINS") {
            config.allowed_origins = value
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(|o| o.trim_end_matches('/').to_string())
                .collect();
        }

        if let Some(value) = lookup("QUICKLE_WORD_LIST") {
            let value = value.trim();
            config.word_list_path = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }

        if let Some(value) = lookup("QUICKLE_CANDIDATE_LIMIT") {
            let limit: usize = parse_var("QUICKLE_CANDIDATE_LIMIT", &value)?;
            if limit == 0 {
                return Err(ConfigError::InvalidValue {
                    var: "QUICKLE_CANDIDATE_LIMIT",
                    value,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.candidate_limit = limit;
        }

        if let Some(value) = lookup("QUICKLE_REVEAL_WORD") {
            config.reveal_word = parse_flag("QUICKLE_REVEAL_WORD", &value)?;
        }

        if let Some(value) = lookup("QUICKLE_SEED") {
            config.rng_seed = Some(parse_var("QUICKLE_SEED", &value)?);
        }

        Ok(config)
    }

    /// Sets the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the CORS allow-list.
    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the dictionary path.
    pub fn with_word_list(mut self, path: Option<PathBuf>) -> Self {
        self.word_list_path = path;
        self
    }

    /// Enables revealing the secret word in the daily-word response.
    pub fn with_reveal_word(mut self, reveal: bool) -> Self {
        self.reveal_word = reveal;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
