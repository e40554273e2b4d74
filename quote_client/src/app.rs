//! User actions wired to the quote store and the sync engine.
//!
//! `App` is what both the one-shot subcommands and the interactive watch loop
//! drive. Every method maps to one user-visible action and returns what should
//! be shown, so the front ends only print.
use log::info;
use quote_common::blob::BlobStore;
use quote_common::{Quote, QuoteStore, Result, view};
use quote_sync::{RemoteCollection, SyncEngine, SyncReport};
use rand::Rng;

/// Message shown after a successful import.
pub const IMPORTED_MESSAGE: &str = "Quotes imported successfully!";
/// Message shown when an import could not be parsed.
pub const INVALID_IMPORT_MESSAGE: &str = "Invalid JSON file. Please upload a valid JSON file.";

/// The quote store together with the engine that syncs it.
pub struct App<B: BlobStore, R: RemoteCollection> {
    store: QuoteStore<B>,
    engine: SyncEngine<R>,
}

impl<B: BlobStore, R: RemoteCollection> App<B, R> {
    /// Creates the application around an opened store.
    pub fn new(store: QuoteStore<B>, engine: SyncEngine<R>) -> Self {
        Self { store, engine }
    }

    /// Read access to the store.
    pub fn store(&self) -> &QuoteStore<B> {
        &self.store
    }

    /// The sync engine, e.g. to clone it onto a worker thread.
    pub fn engine(&self) -> &SyncEngine<R> {
        &self.engine
    }

    /// Selector line followed by the quotes matching the current filter.
    pub fn show(&self) -> String {
        format!(
            "{}\n{}",
            view::render_options(&self.store.category_options(), self.store.current_filter()),
            view::render(&self.store.filtered())
        )
    }

    /// Switches the filter and shows the result.
    pub fn filter(&mut self, category: &str) -> Result<String> {
        self.store.select_filter(category)?;
        Ok(self.show())
    }

    /// One random quote of the current filter, or the empty-view placeholder.
    pub fn random<G: Rng + ?Sized>(&self, rng: &mut G) -> String {
        match self.store.random_quote(rng) {
            Some(quote) => view::render(&[quote]),
            None => view::render(&[]),
        }
    }

    /// Category set of the current list, one per line.
    pub fn categories(&self) -> String {
        self.store.categories().join("\n")
    }

    /// Adds a quote. With `sync` set, a full sync cycle follows.
    pub fn add(&mut self, text: &str, category: &str, sync: bool) -> Result<Option<SyncReport>> {
        self.store.add(text, category)?;
        Ok(sync.then(|| self.sync()))
    }

    /// Appends quotes from JSON bytes. With `sync` set, a full sync cycle follows.
    pub fn import(&mut self, bytes: &[u8], sync: bool) -> Result<(usize, Option<SyncReport>)> {
        let count = self.store.import_json(bytes)?;
        Ok((count, sync.then(|| self.sync())))
    }

    /// The current list as pretty JSON bytes.
    pub fn export(&self) -> Result<Vec<u8>> {
        self.store.export_json()
    }

    /// Runs a blocking sync cycle.
    pub fn sync(&mut self) -> SyncReport {
        self.engine.sync(&mut self.store)
    }

    /// Merges a remote snapshot fetched elsewhere.
    pub fn apply_remote(&mut self, remote: Vec<Quote>) -> SyncReport {
        self.engine.apply(&mut self.store, remote)
    }

    /// Posts the current list to the remote collection.
    pub fn push(&self) -> bool {
        let accepted = self.engine.push_local(self.store.quotes());
        info!("Push accepted: {}", accepted);
        accepted
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use quote_common::{MemoryBlobStore, QuoteError};
    use quote_sync::RemoteRecord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Remote that serves a fixed set of titles and accepts every post.
    pub(crate) struct StaticRemote(pub Vec<&'static str>);

    impl RemoteCollection for StaticRemote {
        fn fetch(&self) -> Result<Vec<RemoteRecord>> {
            Ok(self
                .0
                .iter()
                .map(|t| RemoteRecord { title: t.to_string() })
                .collect())
        }

        fn post(&self, _quotes: &[Quote]) -> Result<bool> {
            Ok(true)
        }
    }

    pub(crate) fn app_with(
        quotes: &[Quote],
        titles: Vec<&'static str>,
    ) -> App<MemoryBlobStore, StaticRemote> {
        let mut store = QuoteStore::open(MemoryBlobStore::new());
        store.replace(quotes.to_vec()).unwrap();
        App::new(store, SyncEngine::new(StaticRemote(titles)))
    }

    #[test]
    fn show_lists_options_and_filtered_quotes() {
        let mut app = app_with(&[Quote::new("a", "X"), Quote::new("b", "Y")], vec![]);
        assert_eq!(app.show(), "[*all] [X] [Y]\n\"a\" (X)\n\"b\" (Y)");
        assert_eq!(app.filter("Y").unwrap(), "[all] [X] [*Y]\n\"b\" (Y)");
    }

    #[test]
    fn random_on_empty_filter_shows_placeholder() {
        let mut app = app_with(&[Quote::new("a", "X")], vec![]);
        app.filter("Y").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(app.random(&mut rng), view::EMPTY_VIEW);
    }

    #[test]
    fn add_then_sync_merges_remote() {
        let mut app = app_with(&[Quote::new("a", "X")], vec!["a", "s"]);
        let report = app.add("b", "Y", true).unwrap().unwrap();
        assert_eq!(report.after, 3);
        assert_eq!(
            app.store().quotes(),
            &[Quote::new("a", "X"), Quote::new("b", "Y"), Quote::from_server("s")]
        );
    }

    #[test]
    fn invalid_add_skips_sync() {
        let mut app = app_with(&[Quote::new("a", "X")], vec!["s"]);
        assert!(matches!(app.add("", "Y", true), Err(QuoteError::Validation(_))));
        assert_eq!(app.store().quotes(), &[Quote::new("a", "X")]);
    }

    #[test]
    fn malformed_import_reports_and_keeps_list() {
        let mut app = app_with(&[Quote::new("a", "X")], vec!["s"]);
        assert!(matches!(app.import(b"not json", true), Err(QuoteError::Parse(_))));
        assert_eq!(app.store().quotes(), &[Quote::new("a", "X")]);
    }

    #[test]
    fn import_without_sync_keeps_duplicates_until_next_sync() {
        let mut app = app_with(&[Quote::new("a", "X")], vec![]);
        let (count, report) = app
            .import(br#"[{"text":"a","category":"Y"}]"#, false)
            .unwrap();
        assert_eq!(count, 1);
        assert!(report.is_none());
        assert_eq!(app.store().quotes().len(), 2);

        app.sync();
        assert_eq!(app.store().quotes(), &[Quote::new("a", "X")]);
    }

    #[test]
    fn push_reports_acceptance() {
        let app = app_with(&[Quote::new("a", "X")], vec![]);
        assert!(app.push());
    }
}
