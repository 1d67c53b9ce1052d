//! Batched catalog loading with progressive snapshots.
//!
//! The loader fetches the bounded summary list, then enriches it in
//! fixed-size batches: all detail fetches within a batch run concurrently,
//! batches run strictly in sequence. After every batch the entire running
//! collection is republished as an immutable snapshot, so a subscriber sees
//! the collection grow in whole-batch increments and never observes a
//! partial batch.

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::future::join_all;
use pokedex_catalog::{CatalogEntry, CatalogError, ClientTrait};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// Bound on the initial list request.
pub const DEFAULT_LIST_LIMIT: u32 = 500;

/// How many detail fetches run concurrently per batch.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(40).unwrap();

/// A complete, immutable copy of the loaded collection.
///
/// `loading` stays true from the start of a load until the final settle;
/// `error` is set only when the initial list call fails.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub entries: Arc<Vec<CatalogEntry>>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// The initial list call failed; with no base list the load aborts and
    /// no partial collection is shown.
    #[error("failed to fetch the entry list")]
    ListEntries(#[source] CatalogError),
    /// Every snapshot receiver was dropped, so the load stopped at a batch
    /// boundary.
    #[error("load cancelled, all snapshot subscribers dropped")]
    Cancelled,
}

/// Drives one load pass and publishes snapshots through a watch channel.
#[derive(Debug)]
pub struct BatchLoader<C> {
    client: C,
    list_limit: u32,
    batch_size: NonZeroUsize,
    tx: watch::Sender<CatalogSnapshot>,
}

impl<C: ClientTrait> BatchLoader<C> {
    /// Create a loader and the receiver for its snapshots.
    ///
    /// The initial snapshot is empty with `loading: true`.
    pub fn new(
        client: C,
        list_limit: u32,
        batch_size: NonZeroUsize,
    ) -> (Self, watch::Receiver<CatalogSnapshot>) {
        let (tx, rx) = watch::channel(CatalogSnapshot {
            loading: true,
            ..Default::default()
        });
        let loader = Self {
            client,
            list_limit,
            batch_size,
            tx,
        };
        (loader, rx)
    }

    /// Subscribe to the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.tx.subscribe()
    }

    /// Run the load to completion, returning the final collection.
    ///
    /// A failed detail fetch skips that entry and never aborts the batch;
    /// only the initial list call is fatal. The loop stops at the next batch
    /// boundary once every receiver is gone.
    #[instrument(skip_all)]
    pub async fn run(&self) -> Result<Vec<CatalogEntry>, LoadError> {
        let summaries = match self.client.list_entries(self.list_limit).await {
            Ok(summaries) => summaries,
            Err(err) => {
                self.tx.send_replace(CatalogSnapshot {
                    entries: Arc::new(Vec::new()),
                    loading: false,
                    error: Some(err.to_string()),
                });
                return Err(LoadError::ListEntries(err));
            },
        };
        debug!(n_summaries = summaries.len(), "fetched entry list");

        let mut collection: Vec<CatalogEntry> = Vec::with_capacity(summaries.len());
        let mut published: Arc<Vec<CatalogEntry>> = Arc::new(Vec::new());
        for batch in summaries.chunks(self.batch_size.get()) {
            if self.tx.is_closed() {
                debug!("all snapshot receivers dropped, stopping load");
                return Err(LoadError::Cancelled);
            }

            let details = join_all(
                batch
                    .iter()
                    .map(|summary| self.client.entry_detail(&summary.name)),
            )
            .await;
            let survivors_before = collection.len();
            collection.extend(details.into_iter().flatten());
            debug!(
                batch_len = batch.len(),
                kept = collection.len() - survivors_before,
                "merged batch"
            );

            published = Arc::new(collection.clone());
            self.tx.send_replace(CatalogSnapshot {
                entries: Arc::clone(&published),
                loading: true,
                error: None,
            });
        }

        // Final settle republishes the same collection; only the loading
        // flag flips, so subscribers see no collection change.
        self.tx.send_replace(CatalogSnapshot {
            entries: published,
            loading: false,
            error: None,
        });
        info!(n_entries = collection.len(), "catalog load complete");
        Ok(collection)
    }
}
