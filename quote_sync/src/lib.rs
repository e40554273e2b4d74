//! Synchronisation of the local quote store with a remote quote collection.
//!
//! - `remote` — the `RemoteCollection` port and its blocking HTTP adapter `HttpRemote`.
//! - `engine` — `SyncEngine` (fetch, push, merge, sync) and the `SyncReport` it produces.
#![warn(missing_docs)]
pub mod engine;
pub mod remote;

pub use engine::{SyncEngine, SyncReport, merge};
pub use remote::{HttpRemote, RemoteCollection, RemoteRecord};
