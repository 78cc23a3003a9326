use chrono::NaiveDate;

use crate::domain::book::models::Book;

/// Inclusive completion-date window applied before packing.
///
/// Bounds are calendar dates compared against the UTC date of
/// `Book::finished_on`; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, book: &Book) -> bool {
        let finished = book.finished_on.date_naive();
        self.from.map_or(true, |from| finished >= from) && self.to.map_or(true, |to| finished <= to)
    }

    /// Keep only books inside the window, preserving order.
    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        if self.is_unbounded() {
            return books;
        }
        books.into_iter().filter(|b| self.contains(b)).collect()
    }
}
