//! Command-line arguments for the quote client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quote_common::config::{
    DEFAULT_ENDPOINT, DEFAULT_STORE_PATH, EXPORT_FILE_NAME, SYNC_INTERVAL_SECS,
};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON file holding the persisted quotes and the last selected filter.
    #[clap(long, default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Remote collection endpoint used for both fetching and posting quotes.
    #[clap(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Seconds between automatic syncs in watch mode.
    #[clap(
        long,
        default_value_t = SYNC_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sync_interval: u64,

    /// Optional HTTP timeout in seconds; the transport default applies otherwise.
    #[clap(long)]
    pub timeout: Option<u64>,

    /// What to do. Defaults to `watch`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot actions and the interactive watch mode.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the category selector and the quotes of the current filter.
    Show {
        /// Select this category first (`all` for every quote).
        #[clap(long)]
        category: Option<String>,
    },
    /// Show one random quote of the current filter.
    Random,
    /// List the distinct categories.
    Categories,
    /// Add a quote, then sync.
    Add {
        /// Quote text.
        text: String,
        /// Quote category.
        category: String,
        /// Skip the sync that normally follows.
        #[clap(long)]
        no_sync: bool,
    },
    /// Import quotes from a JSON file, then sync.
    Import {
        /// File containing a JSON array of `{text, category}`.
        path: PathBuf,
        /// Skip the sync that normally follows.
        #[clap(long)]
        no_sync: bool,
    },
    /// Export all quotes as pretty JSON.
    Export {
        /// Destination file.
        #[clap(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Fetch the remote collection and merge it into the local quotes.
    Sync,
    /// Post the local quotes to the remote collection.
    Push,
    /// Interactive mode: read commands from stdin and sync on a timer.
    Watch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_watch_with_standard_settings() {
        let args = Args::parse_from(["quote_client"]);
        assert!(args.command.is_none());
        assert_eq!(args.store, PathBuf::from("quotes_store.json"));
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.sync_interval, 30);
    }

    #[test]
    fn parses_add_with_flags() {
        let args = Args::parse_from([
            "quote_client",
            "--store",
            "s.json",
            "add",
            "Be brief.",
            "Style",
            "--no-sync",
        ]);
        match args.command {
            Some(Command::Add { text, category, no_sync }) => {
                assert_eq!(text, "Be brief.");
                assert_eq!(category, "Style");
                assert!(no_sync);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn export_defaults_to_quotes_json() {
        let args = Args::parse_from(["quote_client", "export"]);
        assert!(matches!(
            args.command,
            Some(Command::Export { out }) if out == PathBuf::from("quotes.json")
        ));
    }

    #[test]
    fn zero_sync_interval_is_rejected() {
        assert!(Args::try_parse_from(["quote_client", "--sync-interval", "0"]).is_err());
    }
}
