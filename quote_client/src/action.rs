//! Interactive commands typed while the client is watching.
//!
//! Each input line is a verb followed by its arguments, e.g. `filter Motivation`
//! or `add Simplicity is the soul of efficiency. | Engineering`.
use std::str::FromStr;

use quote_common::{QuoteError, Result};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Verbs understood by the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verb {
    /// Show the selector and the filtered quotes.
    Show,
    /// Select a category (`all` for every quote).
    Filter,
    /// Show one random quote of the current filter.
    Random,
    /// List the known categories.
    Categories,
    /// Add a quote: `add <text> | <category>`.
    Add,
    /// Import quotes from a JSON file.
    Import,
    /// Export quotes to a JSON file (default `quotes.json`).
    Export,
    /// Sync with the remote collection now.
    Sync,
    /// Post the local list to the remote collection.
    Push,
    /// Print the verbs.
    Help,
    /// Stop watching.
    Quit,
}

impl Verb {
    fn usage(self) -> &'static str {
        match self {
            Verb::Show => "show",
            Verb::Filter => "filter <category|all>",
            Verb::Random => "random",
            Verb::Categories => "categories",
            Verb::Add => "add <text> | <category>",
            Verb::Import => "import <path>",
            Verb::Export => "export [path]",
            Verb::Sync => "sync",
            Verb::Push => "push",
            Verb::Help => "help",
            Verb::Quit => "quit",
        }
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// What to do.
    pub verb: Verb,
    /// Everything after the verb, trimmed.
    pub rest: String,
}

impl Action {
    /// Splits an `add` argument into text and category around the last `|`.
    pub fn text_and_category(&self) -> (&str, &str) {
        match self.rest.rsplit_once('|') {
            Some((text, category)) => (text.trim(), category.trim()),
            None => (self.rest.as_str(), ""),
        }
    }
}

impl FromStr for Action {
    type Err = QuoteError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let verb = Verb::from_str(head).map_err(|_| {
            QuoteError::Validation(format!("unknown command {:?}, try `help`", head))
        })?;
        Ok(Action {
            verb,
            rest: rest.trim().to_string(),
        })
    }
}

/// Usage lines for every verb.
pub fn help() -> String {
    Verb::iter()
        .map(|verb| format!("  {}", verb.usage()))
        .collect::<Vec<_>>()
        .join("\n")
}
