//! Quote data model and the built-in seed quotes.
//!
//! A `Quote` is a piece of text with a category label. The text doubles as the
//! deduplication key when local and remote lists are merged.
use serde::{Deserialize, Serialize};

use crate::config::SERVER_CATEGORY;

/// A single quote record as stored, imported, exported and posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote body. Non-empty; acts as the deduplication key.
    pub text: String,
    /// User-assigned label, or `Server` for remote-sourced quotes.
    pub category: String,
}

impl Quote {
    /// Creates a quote from any string-like text and category.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Creates a quote sourced from the remote collection.
    pub fn from_server(text: impl Into<String>) -> Self {
        Quote::new(text, SERVER_CATEGORY)
    }

    /// Returns `true` if both fields carry something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && !self.category.trim().is_empty()
    }
}

/// The three seed quotes used when storage holds nothing usable.
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only limit to our realization of tomorrow is our doubts of today.",
            "Inspiration",
        ),
        Quote::new(
            "Do what you can, with what you have, where you are.",
            "Motivation",
        ),
        Quote::new(
            "The best way to predict the future is to invent it.",
            "Innovation",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_quotes_are_fixed_and_ordered() {
        let seeds = default_quotes();
        let categories: Vec<&str> = seeds.iter().map(|q| q.category.as_str()).collect();
        assert_eq!(categories, ["Inspiration", "Motivation", "Innovation"]);
        assert!(seeds.iter().all(Quote::is_complete));
    }

    #[test]
    fn serializes_as_text_and_category() {
        let json = serde_json::to_string(&Quote::new("x", "Local")).unwrap();
        assert_eq!(json, r#"{"text":"x","category":"Local"}"#);
    }

    #[test]
    fn server_quotes_get_server_category() {
        assert_eq!(Quote::from_server("hello").category, "Server");
    }

    #[test]
    fn whitespace_fields_are_incomplete() {
        assert!(!Quote::new("  ", "X").is_complete());
        assert!(!Quote::new("x", "").is_complete());
    }
}
