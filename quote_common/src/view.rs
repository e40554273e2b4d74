//! Plain-text rendering of quote lists and the category selector.
use crate::quote::Quote;

/// Shown in place of the list when nothing matches the filter.
pub const EMPTY_VIEW: &str = "No quotes found for this category.";

/// Renders quotes one per line as `"text" (category)`.
pub fn render(quotes: &[Quote]) -> String {
    if quotes.is_empty() {
        return EMPTY_VIEW.to_string();
    }
    quotes
        .iter()
        .map(|quote| format!("\"{}\" ({})", quote.text, quote.category))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders selector options on one line, marking the selected one with `*`.
pub fn render_options(options: &[String], selected: &str) -> String {
    options
        .iter()
        .map(|option| {
            if option == selected {
                format!("[*{}]", option)
            } else {
                format!("[{}]", option)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
