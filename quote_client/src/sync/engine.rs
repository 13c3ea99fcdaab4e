//! Sync rounds and the polling loop.
use crossbeam_channel::{Receiver, select, tick};
use log::{error, info};
use quote_common::Result;
use std::io::Write;
use std::time::Duration;

use super::{RemoteSource, SyncReport, SyncStrategy, reconcile};
use crate::model::notification::Notification;
use crate::model::store::QuoteStore;
use crate::render::Renderer;
use crate::storage::QuoteRepository;

/// Owns everything a sync round touches.
pub struct SyncEngine<R: QuoteRepository, S: RemoteSource, W: Write> {
    store: QuoteStore,
    repository: R,
    source: S,
    renderer: Renderer<W>,
    strategy: SyncStrategy,
    filter: Option<String>,
    /// Set while merged changes have not been saved yet.
    unsaved: bool,
}

impl<R: QuoteRepository, S: RemoteSource, W: Write> SyncEngine<R, S, W> {
    pub fn new(
        store: QuoteStore,
        repository: R,
        source: S,
        renderer: Renderer<W>,
        strategy: SyncStrategy,
    ) -> Self {
        Self {
            store,
            repository,
            source,
            renderer,
            strategy,
            filter: None,
            unsaved: false,
        }
    }

    /// Category filter applied when re-rendering after a round.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    #[cfg(test)]
    pub fn into_renderer(self) -> Renderer<W> {
        self.renderer
    }

    /// Fetches the remote set, merges it, persists and re-renders if anything
    /// changed, and reports the outcome through a notification.
    pub fn sync_once(&mut self) -> Result<SyncReport> {
        let remote = match self.source.fetch_remote() {
            Ok(remote) => remote,
            Err(e) => {
                self.renderer.render_notification(&Notification::error(&e))?;
                return Err(e);
            }
        };

        let report = reconcile(self.store.quotes_mut(), remote, self.strategy);
        if report.changed() {
            self.unsaved = true;
        }
        if self.unsaved {
            if let Err(e) = self.repository.save(self.store.quotes()) {
                self.renderer.render_notification(&Notification::error(&e))?;
                return Err(e);
            }
            self.unsaved = false;
            self.renderer.refresh(&self.store, self.filter.as_deref())?;
        }
        info!("Sync round finished: {}", report.summary());
        self.renderer
            .render_notification(&Notification::from_report(&report, self.strategy))?;
        Ok(report)
    }

    /// Runs one round immediately and then one per `interval` until `shutdown`
    /// fires or its sender is dropped. Failed rounds are logged and skipped.
    ///
    /// Returns the number of rounds attempted.
    pub fn run_periodic(&mut self, interval: Duration, shutdown: Receiver<()>) -> usize {
        let ticker = tick(interval);
        let mut rounds = 0;
        info!("Polling every {:?} using {}", interval, self.strategy);

        loop {
            rounds += 1;
            if let Err(e) = self.sync_once() {
                error!("Sync round {} failed: {}", rounds, e);
            }
            select! {
                recv(shutdown) -> _ => break,
                recv(ticker) -> _ => {}
            }
        }
        info!("Polling stopped after {} rounds", rounds);
        rounds
    }
}
