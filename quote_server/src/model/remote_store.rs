//! In-memory set of remote quote records.
//!
//! The endpoint behaves like a public test API: it always serves the same small set
//! of records (ids `1..=N`) and answers posts with an echo carrying a fresh id, but
//! never adds posted quotes to the served set.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use quote_common::quote::now_millis;
use quote_common::{Quote, Result};
use rand::Rng;
use rand::seq::IndexedRandom;

/// First id handed out by [`RemoteStore::echo_post`].
pub const FIRST_ECHO_ID: u64 = 101;

const SEED: &[(&str, &str)] = &[
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Motivation",
    ),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Motivation",
    ),
    ("Be yourself; everyone else is already taken.", "Humor"),
    ("Simplicity is prerequisite for reliability.", "Engineering"),
    ("Well begun is half done.", "Wisdom"),
];

const EDIT_SUFFIXES: &[&str] = &["(revised)", "(server edit)", "(updated)", "(amended)"];

fn strip_edit_suffix(text: &str) -> &str {
    EDIT_SUFFIXES
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix).map(str::trim_end))
        .unwrap_or(text)
}

/// Shared remote record set.
pub struct RemoteStore {
    quotes: Mutex<Vec<Quote>>,
    next_echo_id: AtomicU64,
}

impl RemoteStore {
    /// Creates a store holding `quotes`.
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes: Mutex::new(quotes),
            next_echo_id: AtomicU64::new(FIRST_ECHO_ID),
        }
    }

    /// Creates a store holding the built-in seed records with ids starting at 1.
    pub fn seeded() -> Self {
        let now = now_millis();
        let quotes = SEED
            .iter()
            .zip(1u64..)
            .map(|((text, category), id)| Quote {
                id: Some(id),
                text: text.to_string(),
                category: category.to_string(),
                updated_at: Some(now),
            })
            .collect();
        Self::new(quotes)
    }

    /// Clone of every served record.
    pub fn snapshot(&self) -> Result<Vec<Quote>> {
        Ok(self.quotes.lock()?.clone())
    }

    /// Accepts a posted quote and returns it with a server id and fresh timestamp.
    pub fn echo_post(&self, quote: Quote) -> Result<Quote> {
        let mut quote = quote.normalized()?;
        let id = self.next_echo_id.fetch_add(1, Ordering::Relaxed);
        quote.id = Some(id);
        quote.touch();
        debug!("Echoing posted quote as id {}", id);
        Ok(quote)
    }

    /// Rewrites one random record and bumps its timestamp.
    ///
    /// Returns the edited record, or `None` when the store is empty.
    pub fn edit_random<R: Rng>(&self, rng: &mut R) -> Result<Option<Quote>> {
        let mut quotes = self.quotes.lock()?;
        if quotes.is_empty() {
            return Ok(None);
        }
        let index = rng.random_range(0..quotes.len());
        let suffix = EDIT_SUFFIXES.choose(rng).copied().unwrap_or("(updated)");
        let quote = &mut quotes[index];
        let base = strip_edit_suffix(&quote.text).to_string();
        quote.text = format!("{} {}", base, suffix);
        quote.updated_at = Some(now_millis().max(quote.timestamp() + 1));
        Ok(Some(quote.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(store: &RemoteStore, id: u64) -> Option<Quote> {
        store.snapshot().unwrap().into_iter().find(|q| q.id == Some(id))
    }

    #[test]
    fn seeded_store_has_sequential_ids() {
        let store = RemoteStore::seeded();
        let ids: Vec<_> = store.snapshot().unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn echo_assigns_ids_without_growing_the_set() {
        let store = RemoteStore::seeded();
        let first = store.echo_post(Quote::new("new", "").unwrap()).unwrap();
        let second = store.echo_post(Quote::new("newer", "X").unwrap()).unwrap();
        assert_eq!(first.id, Some(FIRST_ECHO_ID));
        assert_eq!(second.id, Some(FIRST_ECHO_ID + 1));
        assert_eq!(first.category, "Uncategorized");
        assert_eq!(store.snapshot().unwrap().len(), SEED.len());
    }

    #[test]
    fn echo_rejects_empty_text() {
        let store = RemoteStore::seeded();
        let quote = Quote {
            id: None,
            text: " ".into(),
            category: "c".into(),
            updated_at: None,
        };
        assert!(store.echo_post(quote).is_err());
    }

    #[test]
    fn edit_random_changes_text_and_bumps_timestamp() {
        let store = RemoteStore::seeded();
        let before = store.snapshot().unwrap();
        let edited = store.edit_random(&mut rand::rng()).unwrap().unwrap();
        let id = edited.id.unwrap();
        let old = before.iter().find(|q| q.id == Some(id)).unwrap();
        assert_ne!(old.text, edited.text);
        assert!(edited.timestamp() > old.timestamp());
        assert_eq!(get(&store, id), Some(edited));
    }

    #[test]
    fn repeated_edits_do_not_stack_suffixes() {
        let store = RemoteStore::new(vec![Quote::new("Keep going.", "Motivation").unwrap().with_id(1)]);
        let mut rng = rand::rng();
        for _ in 0..5 {
            store.edit_random(&mut rng).unwrap();
        }
        let text = get(&store, 1).unwrap().text;
        let suffixes = EDIT_SUFFIXES.iter().filter(|s| text.contains(*s)).count();
        assert_eq!(suffixes, 1);
        assert!(text.starts_with("Keep going. ("));
    }

    #[test]
    fn edit_random_on_empty_store_is_noop() {
        let store = RemoteStore::new(Vec::new());
        assert!(store.edit_random(&mut rand::rng()).unwrap().is_none());
    }
}
