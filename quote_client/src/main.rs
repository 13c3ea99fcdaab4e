//! Quote Client — keeps a local list of quotes, renders it to stdout, imports and
//! exports it as JSON, and reconciles it with a remote quote endpoint either once
//! (`sync`) or periodically (`watch`).
//!
//! Usage example (CLI):
//! ```bash
//! quote_client add --text "Well begun is half done." --category Wisdom --push
//! quote_client list --category Wisdom
//! quote_client watch --server 127.0.0.1:8080 --strategy last-write-wins --interval 10
//! ```
//!
//! Local state lives in the data directory (`.quotes` by default): the quote list,
//! the last selected category and the session cache. See `storage` for details.
#![warn(missing_docs)]
mod args;
mod config;
mod model;
mod render;
mod storage;
mod sync;
mod transfer;

use crate::args::{Args, Command};
use crate::config::Config;
use crate::model::notification::Notification;
use crate::model::store::QuoteStore;
use crate::render::{EMPTY_MESSAGE, Renderer};
use crate::storage::{LocalStorage, QuoteRepository, SessionCache};
use crate::sync::{SyncClient, SyncEngine};
use clap::Parser;
use crossbeam_channel::bounded;
use log::{debug, info, warn};
use quote_common::{QuoteError, Result};
use std::io::{self, Stdout};
use std::path::Path;

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();
    let config = Config::resolve(&args)?;
    debug!("Effective config: {:?}", config);
    run(args.command, &config)
}

fn run(command: Command, config: &Config) -> Result<()> {
    let storage = LocalStorage::new(&config.data_dir);
    let session = SessionCache::new(&config.data_dir);
    let mut store = load_store(&storage)?;
    let mut renderer = Renderer::new(io::stdout());

    match command {
        Command::Add {
            text,
            category,
            push,
        } => {
            let quote = store.add_quote(&text, &category)?.clone();
            storage.save(store.quotes())?;
            renderer.render_notification(&Notification::info("Quote added successfully!"))?;
            renderer.render_quote(&quote)?;
            if push {
                // The echo is informational only; the local copy stays as added.
                match sync_client(config).post_quote(&quote) {
                    Ok(echo) => info!("Posted quote, server answered with id {:?}", echo.id),
                    Err(e) => warn!("Could not post quote: {}", e),
                }
            }
        }
        Command::Random { category } => {
            let filter = match category {
                Some(category) => Some(category),
                None => storage.load_last_category()?,
            };
            match store.random_quote(filter.as_deref()) {
                Some(quote) => {
                    renderer.render_quote(quote)?;
                    session.store_last_viewed(quote)?;
                }
                None => renderer.render_notification(&Notification::info(EMPTY_MESSAGE))?,
            }
        }
        Command::List { category } => {
            if let Some(category) = &category {
                storage.save_last_category(category)?;
            }
            let filter = match category {
                Some(category) => Some(category),
                None => storage.load_last_category()?,
            };
            renderer.refresh(&store, filter.as_deref())?;
        }
        Command::Show { id } => {
            let quote = store.get(id)?;
            renderer.render_quote(quote)?;
            session.store_last_viewed(quote)?;
        }
        Command::Categories => {
            let selected = storage.load_last_category()?;
            renderer.render_categories(&store.categories(), selected.as_deref())?;
        }
        Command::Last => match session.last_viewed()? {
            Some(quote) => renderer.render_quote(&quote)?,
            None => renderer.render_notification(&Notification::info(
                "No quote viewed in this session yet.",
            ))?,
        },
        Command::ClearSession => {
            session.clear()?;
            renderer.render_notification(&Notification::info("Session cache cleared."))?;
        }
        Command::Export { path } => export(&store, &path)?,
        Command::Import { path } => {
            let imported = transfer::import_from_path(&path)?;
            if imported.is_empty() {
                warn!("{} contained no usable quotes", path.display());
            }
            let count = store.extend(imported);
            storage.save(store.quotes())?;
            renderer.render_notification(&Notification::info(format!(
                "Quotes imported successfully! ({} added)",
                count
            )))?;
        }
        Command::Sync => {
            let mut engine = build_engine(store, storage, renderer, config)?;
            engine.sync_once()?;
            debug!("{} quotes after sync", engine.store().len());
        }
        Command::Watch => {
            let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
            ctrlc::set_handler(move || {
                info!("Ctrl+C received. Stopping sync...");
                let _ = shutdown_tx.try_send(());
            })
            .map_err(|e| QuoteError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;

            let mut engine = build_engine(store, storage, renderer, config)?;
            engine.run_periodic(config.sync_interval(), shutdown_rx);
        }
    }
    Ok(())
}

/// Loads the saved list, seeding and saving the defaults on first start.
fn load_store(storage: &LocalStorage) -> Result<QuoteStore> {
    match storage.load()? {
        Some(quotes) => Ok(QuoteStore::new(quotes)),
        None => {
            info!("No saved quotes in {}, seeding defaults", storage.dir().display());
            let store = QuoteStore::with_defaults();
            storage.save(store.quotes())?;
            Ok(store)
        }
    }
}

fn build_engine(
    store: QuoteStore,
    storage: LocalStorage,
    renderer: Renderer<Stdout>,
    config: &Config,
) -> Result<SyncEngine<LocalStorage, SyncClient, Stdout>> {
    let filter = storage.load_last_category()?;
    let client = sync_client(config);
    Ok(SyncEngine::new(store, storage, client, renderer, config.strategy).with_filter(filter))
}

fn sync_client(config: &Config) -> SyncClient {
    SyncClient::new(&config.server_addr).with_timeout(config.timeout())
}

fn export(store: &QuoteStore, path: &Path) -> Result<()> {
    if path == Path::new("-") {
        return transfer::export_to_writer(store.quotes(), io::stdout().lock());
    }
    transfer::export_to_path(store.quotes(), path)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_start_seeds_and_persists_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let store = load_store(&storage).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(storage.load().unwrap().unwrap().len(), 3);
    }

    #[test]
    fn saved_list_is_reloaded_as_is() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let mut store = QuoteStore::default();
        store.add_quote("only one", "Solo").unwrap();
        storage.save(store.quotes()).unwrap();
        assert_eq!(load_store(&storage).unwrap().quotes(), store.quotes());
    }

    #[test]
    fn import_command_appends_and_persists() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("in.json");
        std::fs::write(&file, r#"[{"text": "imported", "category": "Ext"}]"#).unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            ..Config::default()
        };

        run(Command::Import { path: file }, &config).unwrap();

        let saved = LocalStorage::new(&config.data_dir).load().unwrap().unwrap();
        assert_eq!(saved.len(), 4);
        assert_eq!(saved[3].text, "imported");
        assert!(saved[3].id.is_some());
    }

    #[test]
    fn list_command_remembers_category() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        run(
            Command::List {
                category: Some("Humor".into()),
            },
            &config,
        )
        .unwrap();
        let storage = LocalStorage::new(dir.path());
        assert_eq!(storage.load_last_category().unwrap().as_deref(), Some("Humor"));
    }

    #[test]
    fn random_command_records_last_viewed() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        run(
            Command::Random {
                category: Some("Humor".into()),
            },
            &config,
        )
        .unwrap();
        let last = SessionCache::new(dir.path()).last_viewed().unwrap().unwrap();
        assert_eq!(last.category, "Humor");
    }
}
