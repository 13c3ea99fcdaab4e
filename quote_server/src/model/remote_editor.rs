//! Background editor for the remote record set.
//!
//! The `RemoteEditor` runs a thread that rewrites one random remote record per
//! interval, so that clients polling the endpoint see records change underneath
//! their local copies. The thread exits when the shutdown channel fires or is
//! dropped.

use crossbeam_channel::{Receiver, select, tick};
use log::{error, info};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::model::remote_store::RemoteStore;

/// Periodic editor of remote records.
pub struct RemoteEditor;

impl RemoteEditor {
    /// Start the editor thread.
    ///
    /// Returns `None` without spawning anything when `interval` is zero.
    pub fn start(
        store: Arc<RemoteStore>,
        interval: Duration,
        shutdown_rx: Receiver<()>,
    ) -> Option<JoinHandle<()>> {
        if interval.is_zero() {
            info!("Remote editor disabled");
            return None;
        }

        let handle = thread::spawn(move || {
            let ticker = tick(interval);
            let mut rng = rand::rng();
            info!("Remote editor started, interval {:?}", interval);

            loop {
                select! {
                    recv(shutdown_rx) -> _ => break,
                    recv(ticker) -> _ => match store.edit_random(&mut rng) {
                        Ok(Some(quote)) => info!(
                            "Edited remote quote {:?}: \"{}\"",
                            quote.id, quote.text
                        ),
                        Ok(None) => {}
                        Err(e) => {
                            error!("Remote edit failed: {}", e);
                            break;
                        }
                    },
                }
            }
            info!("Remote editor stopping...");
        });
        Some(handle)
    }
}
