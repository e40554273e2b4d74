//!
//! Core types of the quote keeper shared by the sync engine and the client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `Quote` record and the built-in seed quotes.
//! - `blob` — the key/value `BlobStore` seam with memory and file backends.
//! - `store` — `QuoteStore`, the persisted ordered list with filter/import/export.
//! - `view` — plain-text rendering of quote lists.
//! - `notification` — transient, self-hiding user notifications.
//! - `config` — storage keys, endpoints and timing constants.
#![warn(missing_docs)]
pub mod blob;
pub mod config;
pub mod error;
pub mod notification;
pub mod quote;
pub mod result;
pub mod store;
pub mod view;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use error::QuoteError;
pub use notification::Notification;
pub use quote::Quote;
pub use result::Result;
pub use store::QuoteStore;
