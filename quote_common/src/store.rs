//! The quote store: an ordered in-memory list mirrored into a blob store.
//!
//! `QuoteStore` owns the authoritative list of quotes, the currently selected
//! category filter and the blob store the two are persisted to. Every mutation
//! overwrites the `quotes` key wholesale; selecting a filter overwrites `lastFilter`.
//!
//! The free functions [`filter`] and [`categories`] are pure helpers over any
//! slice of quotes and are what the store methods delegate to.
use log::{debug, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::blob::BlobStore;
use crate::config::{ALL_CATEGORIES, StorageKey};
use crate::error::QuoteError;
use crate::quote::{Quote, default_quotes};
use crate::result::Result;

/// Message shown when a quote is added without text or category.
pub const MISSING_FIELDS: &str = "Please fill in both the quote and category fields.";

/// Returns the quotes whose category equals `category`, preserving order.
///
/// The special value `all` returns the whole list unchanged.
pub fn filter(list: &[Quote], category: &str) -> Vec<Quote> {
    if category == ALL_CATEGORIES {
        return list.to_vec();
    }
    list.iter()
        .filter(|quote| quote.category == category)
        .cloned()
        .collect()
}

/// Returns the distinct categories of `list` in first-occurrence order.
pub fn categories(list: &[Quote]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for quote in list {
        if !seen.contains(&quote.category) {
            seen.push(quote.category.clone());
        }
    }
    seen
}

/// Ordered quote list persisted to a [`BlobStore`].
#[derive(Debug)]
pub struct QuoteStore<B: BlobStore> {
    blob: B,
    quotes: Vec<Quote>,
    current_filter: String,
}

impl<B: BlobStore> QuoteStore<B> {
    /// Opens the store on top of `blob`, loading the list and the last selected filter.
    ///
    /// A stored filter naming a category that no longer exists falls back to `all`.
    pub fn open(blob: B) -> Self {
        let mut store = QuoteStore {
            blob,
            quotes: Vec::new(),
            current_filter: ALL_CATEGORIES.to_string(),
        };
        store.quotes = store.load();

        match store.blob.get(StorageKey::LastFilter.as_ref()) {
            Ok(Some(last)) => {
                if last == ALL_CATEGORIES || store.quotes.iter().any(|q| q.category == last) {
                    store.current_filter = last;
                } else {
                    debug!("Stored filter {:?} no longer matches any category", last);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to read the last filter: {}", e),
        }
        store
    }

    /// Reads the persisted list, falling back to the seed quotes.
    ///
    /// Never fails: a missing key, a read error or unparsable JSON all yield
    /// [`default_quotes`].
    pub fn load(&self) -> Vec<Quote> {
        let raw = match self.blob.get(StorageKey::Quotes.as_ref()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default_quotes(),
            Err(e) => {
                warn!("Failed to read stored quotes, using defaults: {}", e);
                return default_quotes();
            }
        };

        match serde_json::from_str::<Option<Vec<Quote>>>(&raw) {
            Ok(Some(quotes)) => quotes,
            Ok(None) => default_quotes(),
            Err(e) => {
                warn!("Stored quotes are not valid JSON, using defaults: {}", e);
                default_quotes()
            }
        }
    }

    /// Makes `list` the current list and overwrites the `quotes` key with it.
    pub fn save(&mut self, list: &[Quote]) -> Result<()> {
        self.quotes = list.to_vec();
        self.persist()
    }

    /// Appends a new quote and persists the list.
    ///
    /// Fails with [`QuoteError::Validation`] when either field is empty or only
    /// whitespace; the list is left untouched in that case. Accepted values are
    /// stored exactly as given.
    pub fn add(&mut self, text: &str, category: &str) -> Result<()> {
        let quote = Quote::new(text, category);
        if !quote.is_complete() {
            return Err(QuoteError::Validation(MISSING_FIELDS.to_string()));
        }
        info!("Adding quote in category {}", quote.category);
        self.quotes.push(quote);
        self.persist()
    }

    /// The current list, in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Replaces the whole list and persists it.
    pub fn replace(&mut self, quotes: Vec<Quote>) -> Result<()> {
        self.quotes = quotes;
        self.persist()
    }

    /// The category the view is currently filtered by.
    pub fn current_filter(&self) -> &str {
        &self.current_filter
    }

    /// Selects a new filter, remembers it under `lastFilter` and returns the filtered view.
    pub fn select_filter(&mut self, category: &str) -> Result<Vec<Quote>> {
        self.blob.set(StorageKey::LastFilter.as_ref(), category)?;
        self.current_filter = category.to_string();
        Ok(self.filtered())
    }

    /// Quotes matching the current filter.
    pub fn filtered(&self) -> Vec<Quote> {
        filter(&self.quotes, &self.current_filter)
    }

    /// Distinct categories of the current list.
    pub fn categories(&self) -> Vec<String> {
        categories(&self.quotes)
    }

    /// Selector values: `all` followed by every known category.
    pub fn category_options(&self) -> Vec<String> {
        let mut options = vec![ALL_CATEGORIES.to_string()];
        options.extend(self.categories());
        options
    }

    /// Recomputes the category set after the list changed wholesale.
    ///
    /// If the current filter no longer names an existing category it is reset to
    /// `all`, and `lastFilter` is rewritten to match.
    pub fn refresh_categories(&mut self) -> Vec<String> {
        let categories = self.categories();
        if self.current_filter != ALL_CATEGORIES && !categories.contains(&self.current_filter) {
            debug!("Filter {:?} vanished, showing all categories", self.current_filter);
            self.current_filter = ALL_CATEGORIES.to_string();
            if let Err(e) = self.blob.set(StorageKey::LastFilter.as_ref(), ALL_CATEGORIES) {
                warn!("Failed to persist the reset filter: {}", e);
            }
        }
        categories
    }

    /// Picks a random quote among those matching the current filter.
    pub fn random_quote<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Quote> {
        self.filtered().choose(rng).cloned()
    }

    /// Appends quotes parsed from a JSON array and persists the list.
    ///
    /// Malformed bytes fail with [`QuoteError::Parse`], entries missing text or
    /// category fail with [`QuoteError::Validation`]. Either way nothing is
    /// appended. Returns the number of imported quotes.
    pub fn import_json(&mut self, bytes: &[u8]) -> Result<usize> {
        let imported: Vec<Quote> = serde_json::from_slice(bytes)?;
        if let Some(bad) = imported.iter().position(|q| !q.is_complete()) {
            return Err(QuoteError::Validation(format!(
                "imported quote #{} is missing its text or category",
                bad + 1
            )));
        }
        let count = imported.len();
        self.quotes.extend(imported);
        self.persist()?;
        info!("Imported {} quotes", count);
        Ok(count)
    }

    /// The current list as pretty-printed JSON.
    pub fn export_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.quotes)?)
    }

    /// Borrow the underlying blob store.
    pub fn blob(&self) -> &B {
        &self.blob
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.quotes)?;
        self.blob.set(StorageKey::Quotes.as_ref(), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::{FileBlobStore, MemoryBlobStore};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    fn q(text: &str, category: &str) -> Quote {
        Quote::new(text, category)
    }

    fn store_with(quotes: &[Quote]) -> QuoteStore<MemoryBlobStore> {
        let mut blob = MemoryBlobStore::new();
        blob.set("quotes", &serde_json::to_string(quotes).unwrap())
            .unwrap();
        QuoteStore::open(blob)
    }

    #[test]
    fn empty_blob_loads_seed_quotes() {
        let store = QuoteStore::open(MemoryBlobStore::new());
        assert_eq!(store.quotes(), default_quotes().as_slice());
        assert_eq!(store.current_filter(), "all");
    }

    #[test]
    fn garbage_or_null_falls_back_to_seed_quotes() {
        for raw in ["not json", "null", r#"{"text":"a"}"#] {
            let mut blob = MemoryBlobStore::new();
            blob.set("quotes", raw).unwrap();
            let store = QuoteStore::open(blob);
            assert_eq!(store.load(), default_quotes(), "raw = {raw}");
        }
    }

    #[test]
    fn stored_empty_list_stays_empty() {
        let store = store_with(&[]);
        assert!(store.quotes().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let list = vec![q("b", "Y"), q("a", "X"), q("c", "Y")];
        let mut store = QuoteStore::open(MemoryBlobStore::new());
        store.save(&list).unwrap();
        assert_eq!(store.load(), list);
    }

    #[test]
    fn add_appends_and_persists() {
        let mut store = store_with(&[q("a", "X")]);
        store.add("b", "Y").unwrap();
        assert_eq!(store.quotes(), &[q("a", "X"), q("b", "Y")]);
        assert_eq!(store.load(), vec![q("a", "X"), q("b", "Y")]);
    }

    #[test]
    fn add_stores_values_as_given() {
        let mut store = store_with(&[]);
        store.add("  Stay hungry.  ", " Motivation ").unwrap();
        assert_eq!(store.quotes(), &[q("  Stay hungry.  ", " Motivation ")]);
        assert_eq!(store.load(), vec![q("  Stay hungry.  ", " Motivation ")]);
    }

    #[test]
    fn saved_list_survives_next_mutation() {
        let mut store = QuoteStore::open(MemoryBlobStore::new());
        store.save(&[q("saved", "S")]).unwrap();
        assert_eq!(store.quotes(), &[q("saved", "S")]);

        store.add("x", "Y").unwrap();
        assert_eq!(store.load(), vec![q("saved", "S"), q("x", "Y")]);
    }

    #[test]
    fn add_rejects_missing_fields() {
        let mut store = store_with(&[q("a", "X")]);
        assert!(matches!(store.add("", "Y"), Err(QuoteError::Validation(_))));
        assert!(matches!(store.add("x", ""), Err(QuoteError::Validation(_))));
        assert!(matches!(store.add("   ", "Y"), Err(QuoteError::Validation(_))));
        assert_eq!(store.quotes(), &[q("a", "X")]);
        assert_eq!(store.load(), vec![q("a", "X")]);
    }

    #[test]
    fn filter_all_is_identity() {
        let list = vec![q("a", "X"), q("b", "Y"), q("c", "X")];
        assert_eq!(filter(&list, "all"), list);
    }

    #[test]
    fn filter_keeps_matching_category_in_order() {
        let list = vec![q("a", "X"), q("b", "Y")];
        assert_eq!(filter(&list, "X"), vec![q("a", "X")]);
        assert!(filter(&list, "Z").is_empty());
    }

    #[test]
    fn categories_in_discovery_order() {
        let list = vec![q("a", "X"), q("b", "X"), q("c", "Y")];
        assert_eq!(categories(&list), vec!["X", "Y"]);
    }

    #[test]
    fn category_options_start_with_all() {
        let store = store_with(&[q("a", "X"), q("b", "Y")]);
        assert_eq!(store.category_options(), vec!["all", "X", "Y"]);
    }

    #[test]
    fn selected_filter_is_restored_on_reopen() {
        let mut store = store_with(&[q("a", "X"), q("b", "Y")]);
        let view = store.select_filter("Y").unwrap();
        assert_eq!(view, vec![q("b", "Y")]);

        let reopened = QuoteStore::open(store.blob().clone());
        assert_eq!(reopened.current_filter(), "Y");
        assert_eq!(reopened.filtered(), vec![q("b", "Y")]);
    }

    #[test]
    fn stale_stored_filter_falls_back_to_all() {
        let mut blob = MemoryBlobStore::new();
        blob.set("lastFilter", "Gone").unwrap();
        let store = QuoteStore::open(blob);
        assert_eq!(store.current_filter(), "all");
    }

    #[test]
    fn refresh_resets_vanished_filter() {
        let mut store = store_with(&[q("a", "X"), q("b", "Y")]);
        store.select_filter("Y").unwrap();
        store.replace(vec![q("a", "X")]).unwrap();
        assert_eq!(store.refresh_categories(), vec!["X"]);
        assert_eq!(store.current_filter(), "all");
        assert_eq!(store.blob().get("lastFilter").unwrap().as_deref(), Some("all"));
    }

    /// Blob store whose writes to one key always fail.
    struct FailingKey(MemoryBlobStore, &'static str);

    impl BlobStore for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if key == self.1 {
                return Err(std::io::Error::other("disk full").into());
            }
            self.0.set(key, value)
        }
    }

    #[test]
    fn failed_filter_write_keeps_previous_filter() {
        let mut store = QuoteStore::open(FailingKey(MemoryBlobStore::new(), "lastFilter"));
        assert!(matches!(store.select_filter("Motivation"), Err(QuoteError::Io(_))));
        assert_eq!(store.current_filter(), "all");
    }

    #[test]
    fn random_quote_respects_filter() {
        let mut store = store_with(&[q("a", "X"), q("b", "Y"), q("c", "X")]);
        store.select_filter("Y").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(store.random_quote(&mut rng), Some(q("b", "Y")));
        }
        store.select_filter("Nope").unwrap();
        assert_eq!(store.random_quote(&mut rng), None);
    }

    #[test]
    fn import_appends_in_order() {
        let mut store = store_with(&[q("a", "X")]);
        let count = store
            .import_json(br#"[{"text":"b","category":"Y"},{"text":"a","category":"Z"}]"#)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.quotes(), &[q("a", "X"), q("b", "Y"), q("a", "Z")]);
        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn malformed_import_leaves_store_unchanged() {
        let mut store = store_with(&[q("a", "X")]);
        let malformed: [&[u8]; 3] = [b"{oops", br#"{"text":"b","category":"Y"}"#, b""];
        for bytes in malformed {
            assert!(matches!(store.import_json(bytes), Err(QuoteError::Parse(_))));
        }
        assert!(matches!(
            store.import_json(br#"[{"text":"b","category":"Y"},{"text":"","category":"Y"}]"#),
            Err(QuoteError::Validation(_))
        ));
        assert_eq!(store.quotes(), &[q("a", "X")]);
    }

    #[test]
    fn export_is_pretty_json_that_reimports() {
        let store = store_with(&[q("a", "X"), q("b", "Y")]);
        let bytes = store.export_json().unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"text\": \"a\""));

        let mut other = store_with(&[]);
        other.import_json(&bytes).unwrap();
        assert_eq!(other.quotes(), store.quotes());
    }

    #[test]
    fn file_backed_store_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = QuoteStore::open(FileBlobStore::open(&path).unwrap());
        store.add("Stay hungry.", "Motivation").unwrap();
        store.select_filter("Motivation").unwrap();

        let reopened = QuoteStore::open(FileBlobStore::open(&path).unwrap());
        assert_eq!(reopened.quotes().len(), 4);
        assert_eq!(reopened.quotes()[3], q("Stay hungry.", "Motivation"));
        assert_eq!(reopened.current_filter(), "Motivation");
    }
}
