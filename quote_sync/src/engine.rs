//! Reconciliation of the local quote store with the remote collection.
//!
//! A sync cycle is: fetch the remote snapshot, merge it behind the local list,
//! drop every quote whose text was already seen, write the result back to the
//! store and report. The merge is local-first: when both sides carry the same
//! text, the local quote (and its category) is kept.
//!
//! Network failures never abort a cycle. A failed fetch is logged and treated as
//! an empty remote snapshot, so an outage degrades `sync` to a no-op merge.
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use quote_common::blob::BlobStore;
use quote_common::{Notification, Quote, QuoteStore, view};

use crate::remote::RemoteCollection;

/// Message shown after every sync, successful or degraded.
pub const SYNCED_MESSAGE: &str = "Quotes synced with the server.";

/// Concatenates `local` then `remote`, keeping the first quote seen for each text.
pub fn merge(local: &[Quote], remote: &[Quote]) -> Vec<Quote> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(local.len() + remote.len());
    let mut merged = Vec::with_capacity(local.len() + remote.len());
    for quote in local.iter().chain(remote) {
        if seen.insert(quote.text.as_str()) {
            merged.push(quote.clone());
        }
    }
    merged
}

/// Outcome of one sync cycle.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Quotes received from the remote collection.
    pub fetched: usize,
    /// Local list length before the merge.
    pub before: usize,
    /// Store length after the merge.
    pub after: usize,
    /// Entries dropped as duplicate texts.
    pub dropped: usize,
    /// Category set of the merged list.
    pub categories: Vec<String>,
    /// Re-rendered view for the current filter.
    pub view: String,
    /// User-facing completion notice.
    pub notification: Notification,
    /// When the merge was written back.
    pub synced_at: DateTime<Utc>,
}

impl SyncReport {
    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "fetched={} before={} after={} dropped={} at {}",
            self.fetched,
            self.before,
            self.after,
            self.dropped,
            self.synced_at.to_rfc3339()
        )
    }
}

/// Runs sync cycles against a shared remote collection.
///
/// Cloning is cheap; clones share the same remote so a fetch can run on a worker
/// thread while the merge happens on the thread owning the store.
pub struct SyncEngine<R: RemoteCollection> {
    remote: Arc<R>,
}

impl<R: RemoteCollection> Clone for SyncEngine<R> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
        }
    }
}

impl<R: RemoteCollection> SyncEngine<R> {
    /// Creates an engine owning `remote`.
    pub fn new(remote: R) -> Self {
        Self {
            remote: Arc::new(remote),
        }
    }

    /// The remote collection this engine talks to.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Fetches the remote snapshot mapped to `Server` quotes.
    ///
    /// Any failure is logged and yields an empty list.
    pub fn fetch_remote(&self) -> Vec<Quote> {
        match self.remote.fetch() {
            Ok(records) => records
                .into_iter()
                .map(|record| Quote::from_server(record.title))
                .collect(),
            Err(e) => {
                error!("Error fetching quotes from server: {}", e);
                Vec::new()
            }
        }
    }

    /// Posts the full local list. Returns whether the remote accepted it.
    ///
    /// Failures are logged, never retried and never propagated.
    pub fn push_local(&self, quotes: &[Quote]) -> bool {
        match self.remote.post(quotes) {
            Ok(true) => {
                info!("Posted {} quotes to server", quotes.len());
                true
            }
            Ok(false) => {
                warn!("Server rejected {} posted quotes", quotes.len());
                false
            }
            Err(e) => {
                error!("Error posting quotes to server: {}", e);
                false
            }
        }
    }

    /// Merges an already fetched remote snapshot into `store`.
    ///
    /// The merge uses the store's list as it is at call time. A failed write-back
    /// is logged; the in-memory list still holds the merge and the report is
    /// produced regardless.
    pub fn apply<B: BlobStore>(
        &self,
        store: &mut QuoteStore<B>,
        remote: Vec<Quote>,
    ) -> SyncReport {
        let before = store.quotes().len();
        let fetched = remote.len();
        let merged = merge(store.quotes(), &remote);
        let after = merged.len();

        if let Err(e) = store.replace(merged) {
            error!("Failed to persist merged quotes: {}", e);
        }
        let categories = store.refresh_categories();
        let rendered = view::render(&store.filtered());

        let report = SyncReport {
            fetched,
            before,
            after,
            dropped: before + fetched - after,
            categories,
            view: rendered,
            notification: Notification::new(SYNCED_MESSAGE),
            synced_at: Utc::now(),
        };
        info!("Sync complete: {}", report.summary());
        report
    }

    /// Runs a full cycle: fetch, merge, persist, report.
    pub fn sync<B: BlobStore>(&self, store: &mut QuoteStore<B>) -> SyncReport {
        let remote = self.fetch_remote();
        self.apply(store, remote)
    }
}
