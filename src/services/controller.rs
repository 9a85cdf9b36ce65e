use crate::error::{ActionError, RenderError, ValidationError};
use crate::models::book::{BookRecord, SearchField};
use crate::models::store::BookStore;
use crate::render::{PageControls, Renderer, Screen};
use crate::services::catalog::Catalog;
use crate::services::views::Derivation;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How completions of overlapping searches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrdering {
    /// Every completion replaces the result set; the last to resolve wins.
    #[default]
    LastResolved,
    /// Completions older than the newest accepted search are dropped.
    LastSubmitted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    List {
        derivation: Derivation,
    },
    /// `derivation` is the list the record was picked from.
    Detail {
        record: BookRecord,
        derivation: Derivation,
    },
}

impl ViewState {
    pub fn derivation(&self) -> Derivation {
        match self {
            ViewState::List { derivation } | ViewState::Detail { derivation, .. } => *derivation,
        }
    }
}

/// A validated search that has not hit the network yet. Running it needs no
/// access to the controller.
pub struct PendingSearch {
    seq: u64,
    query: String,
    field: SearchField,
    catalog: Arc<dyn Catalog>,
}

impl PendingSearch {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub async fn run(self) -> CompletedSearch {
        let records = self.catalog.search(&self.query, self.field).await;
        CompletedSearch {
            seq: self.seq,
            records,
        }
    }
}

#[derive(Debug)]
pub struct CompletedSearch {
    seq: u64,
    records: Vec<BookRecord>,
}

impl CompletedSearch {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

pub struct ViewController {
    catalog: Arc<dyn Catalog>,
    renderer: Renderer,
    store: BookStore,
    view: ViewState,
    ordering: SearchOrdering,
    next_seq: u64,
    accepted_seq: u64,
    controls: PageControls,
}

impl ViewController {
    pub fn new(catalog: Arc<dyn Catalog>, ordering: SearchOrdering) -> Result<Self, RenderError> {
        Ok(Self {
            catalog,
            renderer: Renderer::new()?,
            store: BookStore::new(),
            view: ViewState::List {
                derivation: Derivation::All,
            },
            ordering,
            next_seq: 0,
            accepted_seq: 0,
            controls: PageControls::default(),
        })
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// The sequence the list view shows, always derived from the full
    /// result set.
    pub fn displayed(&self) -> Vec<BookRecord> {
        self.view.derivation().apply(self.store.current())
    }

    pub fn begin_search(
        &mut self,
        query: &str,
        field: SearchField,
    ) -> Result<PendingSearch, ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            warn!("{}", ValidationError::EmptyQuery);
            return Err(ValidationError::EmptyQuery);
        }

        self.next_seq += 1;
        self.controls.query = query.to_string();
        self.controls.field = field;

        Ok(PendingSearch {
            seq: self.next_seq,
            query: query.to_string(),
            field,
            catalog: Arc::clone(&self.catalog),
        })
    }

    pub fn complete_search(&mut self, done: CompletedSearch) -> Result<Screen, RenderError> {
        if self.ordering == SearchOrdering::LastSubmitted && done.seq < self.accepted_seq {
            warn!(
                "Dropping results of search #{} superseded by search #{}",
                done.seq, self.accepted_seq
            );
            return self.current_view();
        }

        info!("Search #{} returned {} books", done.seq, done.records.len());

        self.accepted_seq = self.accepted_seq.max(done.seq);
        self.store.replace(done.records);
        self.controls.ebook_only = false;
        self.show_list(Derivation::All)
    }

    /// Validates, searches and displays in one go. Holds `&mut self` across
    /// the catalog call, so callers sharing the controller should drive
    /// [`begin_search`](Self::begin_search) and
    /// [`complete_search`](Self::complete_search) themselves.
    pub async fn submit_search(
        &mut self,
        query: &str,
        field: SearchField,
    ) -> Result<Screen, ActionError> {
        let pending = self.begin_search(query, field)?;
        let done = pending.run().await;
        Ok(self.complete_search(done)?)
    }

    pub fn select_record(&mut self, index: usize) -> Result<Screen, ActionError> {
        let derivation = self.view.derivation();
        let displayed = derivation.apply(self.store.current());
        let len = displayed.len();

        let Some(record) = displayed.into_iter().nth(index) else {
            let err = ValidationError::NoSuchRecord { index, len };
            warn!("{}", err);
            return Err(err.into());
        };

        let screen = self.renderer.detail(&record)?;
        self.view = ViewState::Detail { record, derivation };
        Ok(screen)
    }

    pub fn toggle_ebook_filter(&mut self, enabled: bool) -> Result<Screen, RenderError> {
        self.controls.ebook_only = enabled;
        self.show_list(Derivation::from_filter(enabled))
    }

    pub fn request_sort(&mut self) -> Result<Screen, RenderError> {
        self.controls.ebook_only = false;
        self.show_list(Derivation::ByRating)
    }

    pub fn back(&mut self) -> Result<Screen, RenderError> {
        self.show_list(self.view.derivation())
    }

    pub fn current_view(&self) -> Result<Screen, RenderError> {
        match &self.view {
            ViewState::List { derivation } => {
                self.renderer.list(&derivation.apply(self.store.current()))
            }
            ViewState::Detail { record, .. } => self.renderer.detail(record),
        }
    }

    /// Wraps a rendered view in the full page.
    pub fn page(&self, screen: &Screen) -> Result<String, RenderError> {
        self.renderer.page(screen, &self.controls)
    }

    fn show_list(&mut self, derivation: Derivation) -> Result<Screen, RenderError> {
        let records = derivation.apply(self.store.current());
        debug!("Showing {:?} view with {} books", derivation, records.len());

        let screen = self.renderer.list(&records)?;
        self.view = ViewState::List { derivation };
        Ok(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::volumes::Volume;
    use crate::render::ViewKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn book(title: &str, ebook: bool, rating: Option<f64>) -> BookRecord {
        let mut book = BookRecord::from(Volume::default());
        book.title = title.to_string();
        book.ebook_available = ebook;
        book.rating = rating;
        book
    }

    fn titles(records: &[BookRecord]) -> Vec<String> {
        records.iter().map(|b| b.title.clone()).collect()
    }

    /// Answers every search with the same books and records what it was
    /// asked.
    #[derive(Default)]
    struct FixedCatalog {
        books: Vec<BookRecord>,
        calls: Mutex<Vec<(String, SearchField)>>,
    }

    #[async_trait]
    impl Catalog for FixedCatalog {
        async fn search(&self, query: &str, field: SearchField) -> Vec<BookRecord> {
            self.calls.lock().unwrap().push((query.to_string(), field));
            self.books.clone()
        }
    }

    fn controller_with(books: Vec<BookRecord>) -> (ViewController, Arc<FixedCatalog>) {
        let catalog = Arc::new(FixedCatalog {
            books,
            ..Default::default()
        });
        let controller =
            ViewController::new(catalog.clone(), SearchOrdering::LastResolved).unwrap();
        (controller, catalog)
    }

    fn mixed_books() -> Vec<BookRecord> {
        vec![
            book("Solaris", true, Some(3.0)),
            book("Fiasco", false, None),
            book("Eden", true, Some(5.0)),
        ]
    }

    #[test]
    fn starts_on_an_empty_list() {
        let (controller, _) = controller_with(vec![]);
        assert_eq!(
            controller.view_state(),
            &ViewState::List {
                derivation: Derivation::All
            }
        );
        let screen = controller.current_view().unwrap();
        assert!(screen.html.contains("No books available."));
    }

    #[tokio::test]
    async fn blank_query_never_reaches_the_catalog() {
        let (mut controller, catalog) = controller_with(mixed_books());

        for query in ["", "   ", "\t\n"] {
            let err = controller
                .submit_search(query, SearchField::Title)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ActionError::Validation(ValidationError::EmptyQuery)
            ));
        }

        assert!(catalog.calls.lock().unwrap().is_empty());
        assert!(controller.store().is_empty());
    }

    #[tokio::test]
    async fn search_replaces_store_and_shows_list() {
        let (mut controller, catalog) = controller_with(mixed_books());

        let screen = controller
            .submit_search("  lem  ", SearchField::Author)
            .await
            .unwrap();

        assert_eq!(screen.kind, ViewKind::List);
        assert_eq!(controller.store().len(), 3);
        assert_eq!(
            catalog.calls.lock().unwrap().as_slice(),
            &[("lem".to_string(), SearchField::Author)]
        );
    }

    #[tokio::test]
    async fn filter_keeps_available_ebooks_in_order() {
        let (mut controller, _) = controller_with(mixed_books());
        controller.submit_search("lem", SearchField::Author).await.unwrap();

        controller.toggle_ebook_filter(true).unwrap();
        assert_eq!(titles(&controller.displayed()), vec!["Solaris", "Eden"]);

        controller.toggle_ebook_filter(false).unwrap();
        assert_eq!(controller.displayed(), mixed_books());
    }

    #[tokio::test]
    async fn sort_orders_by_rating_with_missing_last() {
        let (mut controller, _) = controller_with(mixed_books());
        controller.submit_search("lem", SearchField::Author).await.unwrap();

        controller.request_sort().unwrap();
        assert_eq!(
            titles(&controller.displayed()),
            vec!["Eden", "Solaris", "Fiasco"]
        );
    }

    #[tokio::test]
    async fn sort_ignores_an_active_filter() {
        let (mut controller, _) = controller_with(mixed_books());
        controller.submit_search("lem", SearchField::Author).await.unwrap();

        controller.toggle_ebook_filter(true).unwrap();
        controller.request_sort().unwrap();
        assert_eq!(controller.displayed().len(), 3);
    }

    #[tokio::test]
    async fn select_then_back_restores_the_same_ordering() {
        let (mut controller, _) = controller_with(mixed_books());
        controller.submit_search("lem", SearchField::Author).await.unwrap();
        controller.request_sort().unwrap();
        let before = controller.displayed();

        let screen = controller.select_record(1).unwrap();
        assert_eq!(screen.kind, ViewKind::Detail);
        assert!(screen.html.contains("Solaris"));
        assert!(matches!(
            controller.view_state(),
            ViewState::Detail { record, .. } if record.title == "Solaris"
        ));

        let screen = controller.back().unwrap();
        assert_eq!(screen.kind, ViewKind::List);
        assert_eq!(controller.displayed(), before);
        assert_eq!(controller.store().current(), mixed_books().as_slice());
    }

    #[tokio::test]
    async fn select_out_of_range_leaves_state_alone() {
        let (mut controller, _) = controller_with(mixed_books());
        controller.submit_search("lem", SearchField::Author).await.unwrap();

        let err = controller.select_record(3).unwrap_err();
        assert!(matches!(
            err,
            ActionError::Validation(ValidationError::NoSuchRecord { index: 3, len: 3 })
        ));
        assert!(matches!(controller.view_state(), ViewState::List { .. }));
    }

    #[tokio::test]
    async fn filter_from_detail_returns_to_list() {
        let (mut controller, _) = controller_with(mixed_books());
        controller.submit_search("lem", SearchField::Author).await.unwrap();
        controller.select_record(0).unwrap();

        let screen = controller.toggle_ebook_filter(true).unwrap();
        assert_eq!(screen.kind, ViewKind::List);
        assert_eq!(
            controller.view_state(),
            &ViewState::List {
                derivation: Derivation::EbookOnly
            }
        );
    }

    #[tokio::test]
    async fn new_search_resets_the_derived_view() {
        let (mut controller, _) = controller_with(mixed_books());
        controller.submit_search("lem", SearchField::Author).await.unwrap();
        controller.toggle_ebook_filter(true).unwrap();

        controller.submit_search("solaris", SearchField::Title).await.unwrap();
        assert_eq!(controller.displayed().len(), 3);
    }

    fn completed(seq: u64, titles: &[&str]) -> CompletedSearch {
        CompletedSearch {
            seq,
            records: titles.iter().map(|t| book(t, false, None)).collect(),
        }
    }

    #[test]
    fn last_resolved_lets_a_late_older_search_win() {
        let (mut controller, _) = controller_with(vec![]);
        let first = controller.begin_search("first", SearchField::Title).unwrap();
        let second = controller.begin_search("second", SearchField::Title).unwrap();
        assert!(first.seq() < second.seq());

        controller
            .complete_search(completed(second.seq(), &["new"]))
            .unwrap();
        controller
            .complete_search(completed(first.seq(), &["old"]))
            .unwrap();

        assert_eq!(titles(controller.store().current()), vec!["old"]);
    }

    #[test]
    fn last_submitted_drops_a_late_older_search() {
        let catalog = Arc::new(FixedCatalog::default());
        let mut controller =
            ViewController::new(catalog, SearchOrdering::LastSubmitted).unwrap();
        let first = controller.begin_search("first", SearchField::Title).unwrap();
        let second = controller.begin_search("second", SearchField::Title).unwrap();

        controller
            .complete_search(completed(second.seq(), &["new"]))
            .unwrap();
        controller
            .complete_search(completed(first.seq(), &["old"]))
            .unwrap();

        assert_eq!(titles(controller.store().current()), vec!["new"]);
    }
}
