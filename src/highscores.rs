//! Best-score persistence
//!
//! One integer per game under its own key. Storage may be missing or throw
//! (private browsing, disabled storage); every failure is swallowed here and
//! reads as "no record".

use std::collections::HashMap;
use std::fmt;

/// Failure reported by a storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage available in this environment
    Unavailable,
    /// The backend refused the operation (quota, security error, ...)
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Rejected(reason) => write!(f, "storage rejected operation: {}", reason),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key-value persistence backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory backend (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// High score table backed by a key-value store
pub struct HighScores {
    store: Box<dyn KeyValueStore>,
}

impl HighScores {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored best for `key`, `None` if absent, unreadable or unparseable
    pub fn load(&self, key: &str) -> Option<u32> {
        match self.store.get(key) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(score) => Some(score),
                Err(_) => {
                    log::warn!("Ignoring malformed high score under {}: {:?}", key, raw);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("High score load failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Best-effort write
    pub fn save(&mut self, key: &str, score: u32) {
        match self.store.set(key, &score.to_string()) {
            Ok(()) => log::info!("High score saved: {} = {}", key, score),
            Err(e) => log::warn!("High score save failed for {}: {}", key, e),
        }
    }

    /// Whether `score` beats `previous` (anything beats no record; ties don't)
    pub fn beats(score: u32, previous: Option<u32>) -> bool {
        previous.is_none_or(|best| score > best)
    }

    /// Persist `score` if it beats `previous`. Returns whether it did.
    pub fn submit(&mut self, key: &str, score: u32, previous: Option<u32>) -> bool {
        if !Self::beats(score, previous) {
            return false;
        }
        self.save(key, score);
        true
    }

    /// Underlying store (settings share it)
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_and_present() {
        let scores = HighScores::new(Box::new(MemoryStore::new().with("highScore_inbox", "12")));
        assert_eq!(scores.load("highScore_inbox"), Some(12));
        assert_eq!(scores.load("highScore_catcher"), None);
    }

    #[test]
    fn test_zero_is_a_real_record() {
        let scores = HighScores::new(Box::new(MemoryStore::new().with("k", "0")));
        assert_eq!(scores.load("k"), Some(0));
    }

    #[test]
    fn test_malformed_value_reads_as_none() {
        let scores = HighScores::new(Box::new(MemoryStore::new().with("k", "lots")));
        assert_eq!(scores.load("k"), None);
    }

    #[test]
    fn test_unavailable_storage_is_swallowed() {
        let mut scores = HighScores::new(Box::new(MemoryStore::unavailable()));
        assert_eq!(scores.load("k"), None);
        scores.save("k", 10);
        // Submit still reports the new best even though the write failed
        assert!(scores.submit("k", 3, None));
        assert_eq!(scores.load("k"), None);
    }

    #[test]
    fn test_submit_only_on_strictly_greater() {
        let mut scores = HighScores::new(Box::new(MemoryStore::new()));
        assert!(!scores.submit("k", 5, Some(5)));
        assert_eq!(scores.load("k"), None);
        assert!(!scores.submit("k", 4, Some(5)));
        assert!(scores.submit("k", 6, Some(5)));
        assert_eq!(scores.load("k"), Some(6));
    }

    #[test]
    fn test_anything_beats_no_record() {
        assert!(HighScores::beats(0, None));
        assert!(!HighScores::beats(0, Some(0)));
    }
}
