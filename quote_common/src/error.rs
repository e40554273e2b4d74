//! Error types shared by the store, the sync engine and the client.
//!
//! The `QuoteError` enum unifies the failure cases of the workspace: storage I/O,
//! malformed JSON (stored or imported), missing user input, remote collection
//! failures and a broken event-loop channel. Crates propagate this single type.
use std::io;

use thiserror::Error;

/// Unified error type shared by all crates of the workspace.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error from the file-backed blob store or import/export files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Required user input is missing (empty quote text or category).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stored or imported bytes are not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The remote collection could not be reached or answered with garbage.
    #[error("Network error: {0}")]
    Network(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),
}

impl QuoteError {
    /// Returns `true` for errors the user caused and should be told about directly.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, QuoteError::Validation(_) | QuoteError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_parse_are_user_facing() {
        let parse = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(QuoteError::Validation("x".into()).is_user_facing());
        assert!(QuoteError::Parse(parse).is_user_facing());
        assert!(!QuoteError::Network("down".into()).is_user_facing());
    }
}
