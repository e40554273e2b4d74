//! The remote quote collection: a read/write port and its HTTP adapter.
//!
//! The sync engine talks to the remote side only through the `RemoteCollection`
//! trait. `HttpRemote` implements it against a JSON endpoint with a blocking
//! `reqwest` client: `GET` returns a list of records carrying at least a `title`,
//! `POST` accepts the full local list as a JSON body.
use std::time::Duration;

use log::{debug, info};
use quote_common::{Quote, QuoteError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

/// A record as served by the remote collection. Fields other than `title` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRecord {
    /// Record title, mapped to the quote text.
    pub title: String,
}

/// Read/write access to the remote quote collection.
pub trait RemoteCollection: Send + Sync {
    /// Fetches the current remote snapshot.
    fn fetch(&self) -> Result<Vec<RemoteRecord>>;

    /// Posts the full local list; returns whether the remote accepted it.
    fn post(&self, quotes: &[Quote]) -> Result<bool>;
}

fn network(e: reqwest::Error) -> QuoteError {
    QuoteError::Network(e.to_string())
}

/// `RemoteCollection` over HTTP using one endpoint for both reads and writes.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    endpoint: String,
}

impl HttpRemote {
    /// Builds a client for `endpoint`. No timeout beyond the transport default is set
    /// unless `timeout` is given.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(network)?;
        info!("Remote collection endpoint: {}", endpoint);
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl RemoteCollection for HttpRemote {
    fn fetch(&self) -> Result<Vec<RemoteRecord>> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(network)?
            .error_for_status()
            .map_err(network)?;
        let records: Vec<RemoteRecord> = response.json().map_err(network)?;
        debug!("Fetched {} records from {}", records.len(), self.endpoint);
        Ok(records)
    }

    fn post(&self, quotes: &[Quote]) -> Result<bool> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(quotes)
            .send()
            .map_err(network)?;
        debug!("POST {} answered {}", self.endpoint, response.status());
        Ok(response.status().is_success())
    }
}
