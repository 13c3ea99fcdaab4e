//! In-memory quote list.
//!
//! `QuoteStore` owns the local array of quotes. Every user action (add, import,
//! filter, random pick) and every sync round goes through it; persistence and
//! rendering are handled by the caller.

use log::debug;
use quote_common::quote::now_millis;
use quote_common::{Quote, QuoteError, Result};
use rand::seq::IndexedRandom;
use std::collections::HashSet;

/// Filter value matching every category.
pub const ALL_CATEGORIES: &str = "all";

/// Quotes shown on first start, before anything has been saved.
const DEFAULT_QUOTES: &[(&str, &str)] = &[
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Motivation",
    ),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Motivation",
    ),
    ("Be yourself; everyone else is already taken.", "Humor"),
];

/// Local quote list.
#[derive(Debug, Default, Clone)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

/// True when `filter` selects `quote`. `None` and `"all"` select everything.
pub fn matches_filter(quote: &Quote, filter: Option<&str>) -> bool {
    match filter {
        None | Some(ALL_CATEGORIES) => true,
        Some(category) => quote.category == category,
    }
}

impl QuoteStore {
    /// Creates a store over already-loaded quotes.
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Creates a store holding the built-in default quotes.
    pub fn with_defaults() -> Self {
        let mut store = Self::default();
        for (text, category) in DEFAULT_QUOTES {
            // Built-in entries are non-empty.
            if let Err(e) = store.add_quote(text, category) {
                debug!("Skipping default quote: {}", e);
            }
        }
        store
    }

    /// All quotes in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Mutable access for reconciliation.
    pub fn quotes_mut(&mut self) -> &mut Vec<Quote> {
        &mut self.quotes
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True when there are no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    fn next_id(&self) -> u64 {
        let max_id = self.quotes.iter().filter_map(|q| q.id).max().unwrap_or(0);
        let now = u64::try_from(now_millis()).unwrap_or(0);
        now.max(max_id.saturating_add(1))
    }

    /// Validates and appends a new quote, returning the stored record.
    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<&Quote> {
        let id = self.next_id();
        let quote = Quote::new(text, category)?.with_id(id);
        debug!("Adding quote {}: \"{}\"", id, quote.text);
        self.quotes.push(quote);
        Ok(&self.quotes[self.quotes.len() - 1])
    }

    /// Appends already-built records, giving timestamps to those missing one and
    /// fresh ids to those missing one or carrying an id already in the store.
    ///
    /// Returns the number of records appended.
    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) -> usize {
        let mut known: HashSet<u64> = self.quotes.iter().filter_map(|q| q.id).collect();
        let mut added = 0;
        for mut quote in quotes {
            let id = match quote.id {
                Some(id) if !known.contains(&id) => id,
                taken => {
                    let fresh = self.next_id();
                    if let Some(old) = taken {
                        debug!("Id {} already in use, re-assigned as {}", old, fresh);
                    }
                    fresh
                }
            };
            known.insert(id);
            quote.id = Some(id);
            if quote.updated_at.is_none() {
                quote.touch();
            }
            self.quotes.push(quote);
            added += 1;
        }
        added
    }

    /// Looks up a quote by id.
    pub fn get(&self, id: u64) -> Result<&Quote> {
        self.quotes
            .iter()
            .find(|q| q.id == Some(id))
            .ok_or(QuoteError::QuoteNotFound(id))
    }

    /// Quotes of the given category; `"all"` or `None` returns everything.
    pub fn filter_by_category(&self, filter: Option<&str>) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| matches_filter(q, filter))
            .collect()
    }

    /// Unique categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.contains(&quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    /// Picks a random quote among those matching `filter`.
    pub fn random_quote(&self, filter: Option<&str>) -> Option<&Quote> {
        let candidates = self.filter_by_category(filter);
        candidates.choose(&mut rand::rng()).copied()
    }
}
