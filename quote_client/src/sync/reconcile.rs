//! Id-based merge of remote records into the local list.
//!
//! Records are matched by `id`. Remote records unknown locally are appended;
//! records present on both sides with different text or category are conflicts,
//! resolved by the chosen [`SyncStrategy`]. Local records the remote does not
//! know about are never touched, and nothing is ever deleted.
use log::{debug, warn};
use quote_common::Quote;
use std::collections::HashMap;

use super::SyncStrategy;

/// Which copy survived a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    TookRemote,
    KeptLocal,
}

/// A record that differed between local and remote copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub id: u64,
    /// Local copy before resolution.
    pub local: Quote,
    pub remote: Quote,
    pub resolution: Resolution,
}

/// Outcome of a single reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub ignored: usize,
    pub conflicts: Vec<Conflict>,
}

impl SyncReport {
    /// True when the local list was modified.
    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} added, {} updated, {} unchanged",
            self.added, self.updated, self.unchanged
        );
        if self.ignored > 0 {
            summary.push_str(&format!(", {} ignored", self.ignored));
        }
        summary
    }
}

impl SyncStrategy {
    /// Decides a conflict between two copies with different content.
    pub fn resolve(self, local: &Quote, remote: &Quote) -> Resolution {
        match self {
            SyncStrategy::ServerWins => Resolution::TookRemote,
            SyncStrategy::LastWriteWins if remote.timestamp() > local.timestamp() => {
                Resolution::TookRemote
            }
            SyncStrategy::LastWriteWins => Resolution::KeptLocal,
        }
    }
}

/// Merges `remote` into `local` and reports what happened.
pub fn reconcile(local: &mut Vec<Quote>, remote: Vec<Quote>, strategy: SyncStrategy) -> SyncReport {
    let mut report = SyncReport::default();
    let mut index: HashMap<u64, usize> = local
        .iter()
        .enumerate()
        .filter_map(|(i, quote)| quote.id.map(|id| (id, i)))
        .collect();

    for incoming in remote {
        let Some(id) = incoming.id else {
            debug!("Ignoring remote quote without id: \"{}\"", incoming.text);
            report.ignored += 1;
            continue;
        };
        let incoming = match incoming.normalized() {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Ignoring remote quote {}: {}", id, e);
                report.ignored += 1;
                continue;
            }
        };

        let Some(&position) = index.get(&id) else {
            local.push(incoming);
            index.insert(id, local.len() - 1);
            report.added += 1;
            continue;
        };

        let current = &mut local[position];
        if current.same_content(&incoming) {
            report.unchanged += 1;
            continue;
        }

        let resolution = strategy.resolve(current, &incoming);
        debug!("Conflict on quote {} resolved as {:?}", id, resolution);
        let conflict = Conflict {
            id,
            local: current.clone(),
            remote: incoming.clone(),
            resolution,
        };
        if resolution == Resolution::TookRemote {
            *current = incoming;
            report.updated += 1;
        }
        report.conflicts.push(conflict);
    }
    report
}
