//! Content moderation
//!
//! Free-text fields are screened against a blocklist loaded from a
//! newline-delimited file. The list is cached process-wide with a TTL;
//! a racing reload after expiry is harmless because the load is pure.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use thiserror::Error;
use tracing::debug;

/// Default refresh interval for the word list (2 hours)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7200);

/// Where the blocklist lives and how long a loaded copy stays valid
#[derive(Clone, Debug)]
pub struct ModerationConfig {
    pub words_file: PathBuf,
    pub cache_ttl: Duration,
}

impl ModerationConfig {
    pub fn new(words_file: impl Into<PathBuf>) -> Self {
        Self {
            words_file: words_file.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

#[derive(Error, Debug, Clone)]
pub enum ModerationError {
    #[error("{}", forbidden_word_message(.field))]
    ForbiddenWord { field: &'static str },

    #[error("Word list unavailable: {0}")]
    ListUnavailable(String),
}

fn forbidden_word_message(field: &str) -> String {
    let mut chars = field.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{capitalized} contains forbidden words.")
}

/// Blocklist-backed word filter with a get-or-load-with-expiry cache
pub struct WordFilter {
    config: ModerationConfig,
    cache: Cache<(), Arc<HashSet<String>>>,
}

impl WordFilter {
    pub fn new(config: ModerationConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.cache_ttl)
            .build();

        Self { config, cache }
    }

    /// The cached word set, loading it from disk on a miss
    pub fn bad_words(&self) -> Result<Arc<HashSet<String>>, ModerationError> {
        self.cache
            .try_get_with((), || {
                debug!(file = %self.config.words_file.display(), "loading word list");
                load_words(&self.config.words_file).map(Arc::new)
            })
            .map_err(|e: Arc<io::Error>| ModerationError::ListUnavailable(e.to_string()))
    }

    /// Whole-token screening: the field fails when any whitespace-separated
    /// token of `text`, lowercased, appears in the blocklist. Substrings
    /// inside a token are not flagged.
    pub fn check_field(&self, field: &'static str, text: &str) -> Result<(), ModerationError> {
        let bad_words = self.bad_words()?;
        let lowered = text.to_lowercase();
        let tokens: HashSet<&str> = lowered.split_whitespace().collect();

        if tokens.iter().any(|token| bad_words.contains(*token)) {
            Err(ModerationError::ForbiddenWord { field })
        } else {
            Ok(())
        }
    }
}

fn load_words(path: &PathBuf) -> io::Result<HashSet<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect())
}
