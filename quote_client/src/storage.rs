//! Persistence for the client.
//!
//! Two layers mirror the in-memory list:
//! - `LocalStorage` — durable JSON files in the data directory: the quote list
//!   (`quotes.json`) and the last selected category filter (`last_category.json`).
//! - `SessionCache` — `session.json`, holding the last viewed quote until
//!   `quote_client clear-session` removes it.
//!
//! All writes go through a temporary file followed by a rename, so a crash never
//! leaves a half-written list behind. Corrupt files surface as JSON errors.
use log::debug;
use quote_common::{Quote, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const QUOTES_FILE: &str = "quotes.json";
const LAST_CATEGORY_FILE: &str = "last_category.json";
const SESSION_FILE: &str = "session.json";

/// Load/save seam for the quote list.
pub trait QuoteRepository {
    /// Returns the saved list, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<Quote>>>;
    /// Replaces the saved list.
    fn save(&self, quotes: &[Quote]) -> Result<()>;
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Durable storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Last category filter the user selected, if any.
    pub fn load_last_category(&self) -> Result<Option<String>> {
        read_json(&self.dir.join(LAST_CATEGORY_FILE))
    }

    pub fn save_last_category(&self, category: &str) -> Result<()> {
        write_json(&self.dir.join(LAST_CATEGORY_FILE), category)
    }
}

impl QuoteRepository for LocalStorage {
    fn load(&self) -> Result<Option<Vec<Quote>>> {
        read_json(&self.dir.join(QUOTES_FILE))
    }

    fn save(&self, quotes: &[Quote]) -> Result<()> {
        write_json(&self.dir.join(QUOTES_FILE), quotes)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionState {
    #[serde(default)]
    last_viewed: Option<Quote>,
}

/// Per-session cache of the last viewed quote.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    fn load(&self) -> Result<SessionState> {
        Ok(read_json::<SessionState>(&self.path)?.unwrap_or_default())
    }

    pub fn last_viewed(&self) -> Result<Option<Quote>> {
        Ok(self.load()?.last_viewed)
    }

    pub fn store_last_viewed(&self, quote: &Quote) -> Result<()> {
        let mut state = self.load()?;
        state.last_viewed = Some(quote.clone());
        write_json(&self.path, &state)
    }

    /// Forgets everything cached for this session.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory repository for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pub saved: std::sync::Mutex<Option<Vec<Quote>>>,
    pub saves: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl QuoteRepository for MemoryRepository {
    fn load(&self) -> Result<Option<Vec<Quote>>> {
        Ok(self.saved.lock()?.clone())
    }

    fn save(&self, quotes: &[Quote]) -> Result<()> {
        *self.saved.lock()? = Some(quotes.to_vec());
        self.saves.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::QuoteError;
    use tempfile::TempDir;

    #[test]
    fn load_returns_none_before_first_save() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_restores_list() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));
        let quotes = vec![Quote::new("a", "b").unwrap().with_id(1)];
        storage.save(&quotes).unwrap();
        assert_eq!(storage.load().unwrap(), Some(quotes));
        assert!(!dir.path().join("nested").join("quotes.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(QUOTES_FILE), b"{oops").unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(storage.load(), Err(QuoteError::SerdeJson(_))));
    }

    #[test]
    fn last_category_roundtrip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert_eq!(storage.load_last_category().unwrap(), None);
        storage.save_last_category("Humor").unwrap();
        assert_eq!(storage.load_last_category().unwrap().as_deref(), Some("Humor"));
    }

    #[test]
    fn session_cache_tracks_last_viewed_and_clears() {
        let dir = TempDir::new().unwrap();
        let session = SessionCache::new(dir.path());
        assert!(session.last_viewed().unwrap().is_none());

        let quote = Quote::new("seen", "Recent").unwrap().with_id(3);
        session.store_last_viewed(&quote).unwrap();
        assert_eq!(session.last_viewed().unwrap(), Some(quote));

        session.clear().unwrap();
        assert!(session.last_viewed().unwrap().is_none());
        session.clear().unwrap();
    }
}
