use crate::models::book::BookRecord;

/// Which derived view of the result set the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Derivation {
    #[default]
    All,
    EbookOnly,
    ByRating,
}

impl Derivation {
    pub fn from_filter(enabled: bool) -> Self {
        if enabled {
            Derivation::EbookOnly
        } else {
            Derivation::All
        }
    }

    pub fn apply(self, records: &[BookRecord]) -> Vec<BookRecord> {
        match self {
            Derivation::All => records.to_vec(),
            Derivation::EbookOnly => filter_ebooks(records, true),
            Derivation::ByRating => sort_by_rating(records),
        }
    }
}

pub fn filter_ebooks(records: &[BookRecord], enabled: bool) -> Vec<BookRecord> {
    records
        .iter()
        .filter(|book| !enabled || book.ebook_available)
        .cloned()
        .collect()
}

/// Highest rated first. `sort_by` is stable, so equal ratings keep their
/// catalog order.
pub fn sort_by_rating(records: &[BookRecord]) -> Vec<BookRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.sort_rating().total_cmp(&a.sort_rating()));
    sorted
}
