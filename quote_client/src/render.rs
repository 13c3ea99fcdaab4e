//! Text rendering of quotes.
//!
//! A `Renderer` owns its output "container". Every list render writes a complete
//! frame (header plus every visible quote), so the latest frame always reflects
//! the whole current list.
use quote_common::{Quote, Result};
use std::io::Write;

use crate::model::notification::Notification;
use crate::model::store::{ALL_CATEGORIES, QuoteStore};

/// Shown in place of a list when nothing matches.
pub const EMPTY_MESSAGE: &str = "No quotes available.";

pub struct Renderer<W: Write> {
    out: W,
}

/// `"text" — category`
pub fn format_quote(quote: &Quote) -> String {
    format!("\"{}\" — {}", quote.text, quote.category)
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render_quote(&mut self, quote: &Quote) -> Result<()> {
        writeln!(self.out, "{}", format_quote(quote))?;
        Ok(())
    }

    /// Writes a full frame for `quotes` under the active `filter`.
    pub fn render_list(&mut self, quotes: &[&Quote], filter: Option<&str>) -> Result<()> {
        let filter = filter.unwrap_or(ALL_CATEGORIES);
        writeln!(self.out, "== Quotes [{}] ({}) ==", filter, quotes.len())?;
        if quotes.is_empty() {
            writeln!(self.out, "{}", EMPTY_MESSAGE)?;
        }
        for quote in quotes {
            match quote.id {
                Some(id) => writeln!(self.out, "[{}] {}", id, format_quote(quote))?,
                None => writeln!(self.out, "[-] {}", format_quote(quote))?,
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Re-renders the store under `filter`.
    pub fn refresh(&mut self, store: &QuoteStore, filter: Option<&str>) -> Result<()> {
        self.render_list(&store.filter_by_category(filter), filter)
    }

    /// Category options with `all` first; the selected one is starred.
    pub fn render_categories(&mut self, categories: &[String], selected: Option<&str>) -> Result<()> {
        let selected = selected.unwrap_or(ALL_CATEGORIES);
        let options = std::iter::once(ALL_CATEGORIES).chain(categories.iter().map(String::as_str));
        for option in options {
            let marker = if option == selected { '*' } else { ' ' };
            writeln!(self.out, "{} {}", marker, option)?;
        }
        Ok(())
    }

    pub fn render_notification(&mut self, note: &Notification) -> Result<()> {
        writeln!(self.out, "[{}] {}", note.level, note.message)?;
        self.out.flush()?;
        Ok(())
    }
}
