use crate::models::book::BookRecord;

/// Holds the result set of the most recent search. Derived views read from
/// it; only a completed search writes to it.
#[derive(Debug, Default)]
pub struct BookStore {
    records: Vec<BookRecord>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, records: Vec<BookRecord>) {
        self.records = records;
    }

    pub fn current(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
