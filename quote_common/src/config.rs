//! Shared constants for storage keys, the remote collection and timing.
use std::time::Duration;

use strum_macros::{AsRefStr, Display};

/// Keys used in the persistent blob store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum StorageKey {
    /// JSON array of every quote in the store.
    #[strum(serialize = "quotes")]
    Quotes,
    /// Last category selected in the filter.
    #[strum(serialize = "lastFilter")]
    LastFilter,
}

/// Filter value that selects every quote.
pub const ALL_CATEGORIES: &str = "all";
/// Category assigned to quotes mapped from the remote collection.
pub const SERVER_CATEGORY: &str = "Server";
/// Read/write endpoint of the placeholder remote collection.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
/// Default location of the file-backed blob store.
pub const DEFAULT_STORE_PATH: &str = "quotes_store.json";
/// Default file name offered for exports.
pub const EXPORT_FILE_NAME: &str = "quotes.json";
/// Interval of the automatic sync timer, in seconds.
pub const SYNC_INTERVAL_SECS: u64 = 30;
/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);
