//! JSON import and export of the quote list.
use log::{info, warn};
use quote_common::{Quote, QuoteError, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Writes `quotes` as a pretty-printed JSON array.
pub fn export_to_writer<W: Write>(quotes: &[Quote], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, quotes)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn export_to_path(quotes: &[Quote], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    export_to_writer(quotes, BufWriter::new(file))?;
    info!("Exported {} quotes to {}", quotes.len(), path.display());
    Ok(())
}

/// Reads a JSON array of quotes.
///
/// Entries that are not quote objects or have empty text are skipped with a
/// warning; a missing or empty category gets the fallback label. Anything other
/// than an array is a format error.
pub fn import_from_reader<R: Read>(reader: R) -> Result<Vec<Quote>> {
    let document: Value = serde_json::from_reader(reader)?;
    let Value::Array(entries) = document else {
        return Err(QuoteError::Format("expected a JSON array of quotes".into()));
    };

    let mut quotes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let parsed = serde_json::from_value::<Quote>(entry)
            .map_err(QuoteError::from)
            .and_then(Quote::normalized);
        match parsed {
            Ok(quote) => quotes.push(quote),
            Err(e) => warn!("Skipping imported entry #{}: {}", index, e),
        }
    }
    Ok(quotes)
}

pub fn import_from_path(path: &Path) -> Result<Vec<Quote>> {
    let file = File::open(path)?;
    let quotes = import_from_reader(BufReader::new(file))?;
    info!("Read {} quotes from {}", quotes.len(), path.display());
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::quote::DEFAULT_CATEGORY;
    use tempfile::TempDir;

    #[test]
    fn export_then_import_through_a_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");
        let quotes = vec![
            Quote::new("one", "A").unwrap().with_id(1),
            Quote::new("two", "B").unwrap().with_id(2),
        ];
        export_to_path(&quotes, &path).unwrap();
        assert_eq!(import_from_path(&path).unwrap(), quotes);
    }

    #[test]
    fn import_accepts_legacy_entries_and_skips_invalid_ones() {
        let json = r#"[
            {"text": "Be yourself", "category": "Humor"},
            {"text": "No category"},
            {"text": "   ", "category": "Blank"},
            {"category": "Missing text"},
            42
        ]"#;
        let quotes = import_from_reader(json.as_bytes()).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].category, "Humor");
        assert_eq!(quotes[1].category, DEFAULT_CATEGORY);
    }

    #[test]
    fn import_rejects_non_array_documents() {
        let err = import_from_reader(r#"{"text": "x"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, QuoteError::Format(_)));
    }

    #[test]
    fn import_rejects_invalid_json() {
        let err = import_from_reader("[".as_bytes()).unwrap_err();
        assert!(matches!(err, QuoteError::SerdeJson(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = import_from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, QuoteError::Io(_)));
    }
}
