//! Mock remote quote endpoint.
//!
//! This binary serves a small fixed set of quote records over TCP so that quote clients
//! have something to reconcile against. It wires together:
//!
//! - `RemoteStore` — the served records (ids `1..=N`) plus an echo counter for posts.
//! - `RemoteEditor` — a background thread that periodically rewrites a random record and
//!   bumps its `updatedAt`, producing conflicts on clients that edited the same id.
//! - `QuoteReceiver` — the TCP accept loop; one request and one response per connection,
//!   each connection on its own thread.
//!
//! Concurrency and shutdown:
//! - The main thread multiplexes accepted posts and the Ctrl+C signal with crossbeam
//!   `select!`. On Ctrl+C the editor is told to stop and the process exits; the accept
//!   loop thread is not joined.
//!
//! Network protocol (high-level):
//! - Bind address: `0.0.0.0:8080` by default (see `quote_common::net::SYNC_PORT`).
//! - Client sends `{"type":"FETCH"}` or `{"type":"POST","quote":{...}}` on one line.
//! - Server answers with `QUOTES`, `CREATED` or `ERROR` on one line and closes.
#![warn(missing_docs)]
use crate::args::Args;
use crate::model::remote_editor::RemoteEditor;
use crate::model::remote_store::RemoteStore;
use crate::receiver::QuoteReceiver;
use clap::Parser;
use crossbeam_channel::{bounded, select, unbounded};
use log::{error, info};
use quote_common::net::addr;
use quote_common::{Quote, QuoteError, Result};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

mod args;
pub mod model;
mod receiver;

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let store = Arc::new(RemoteStore::seeded());
    info!("Serving {} remote quotes", store.snapshot()?.len());

    let (ctrlc_tx, ctrlc_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = ctrlc_tx.try_send(());
    })
    .map_err(|e| QuoteError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;

    let (editor_stop_tx, editor_stop_rx) = unbounded::<()>();
    let editor = RemoteEditor::start(
        Arc::clone(&store),
        Duration::from_secs(args.edit_interval),
        editor_stop_rx,
    );

    let (posted_tx, posted_rx) = unbounded::<Quote>();
    let receiver = QuoteReceiver::new(&addr(&args.bind, args.port))?;
    let receiver_store = Arc::clone(&store);
    thread::spawn(move || {
        if let Err(e) = receiver.serve(receiver_store, Some(posted_tx)) {
            error!("Receiver loop failed: {:?}", e);
        }
    });

    let mut posted = 0usize;
    loop {
        select! {
            recv(posted_rx) -> msg => match msg {
                Ok(_) => posted += 1,
                Err(e) => {
                    error!("Receiver loop gone: {}", e);
                    break;
                }
            },
            recv(ctrlc_rx) -> _ => {
                info!("Ctrl+C received. Shutting down endpoint...");
                break;
            }
        }
    }

    let _ = editor_stop_tx.send(());
    if let Some(handle) = editor {
        let _ = handle.join();
    }
    info!("Endpoint stopped after {} posted quotes", posted);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
