use super::models::Shelf;
use super::models::ShelfLayout;

/// Splits an ordered list of books into shelves that fit a container width.
///
/// Books are assumed to share one width, so packing is plain bucketing by
/// index: every shelf but the last holds exactly `books_per_shelf` books.
/// Nothing is cached between calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShelfPacker {
    layout: ShelfLayout,
}

impl ShelfPacker {
    pub fn new(layout: ShelfLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ShelfLayout {
        &self.layout
    }

    /// Number of books one shelf holds at `container_width`.
    ///
    /// Always at least 1: zero, negative or non-finite capacity degrades to
    /// one book per shelf.
    pub fn books_per_shelf(&self, container_width: f64) -> usize {
        let available = self.layout.available_space(container_width);
        let stride = self.layout.stride();
        if !(available > 0.0) || !(stride > 0.0) {
            return 1;
        }

        let fitting = (available / stride).floor();
        if !fitting.is_finite() || fitting < 1.0 {
            return 1;
        }

        fitting.min(usize::MAX as f64) as usize
    }

    /// Partition `books` into shelves, preserving order.
    pub fn pack<T>(&self, books: Vec<T>, container_width: f64) -> Vec<Shelf<T>> {
        let per_shelf = self.books_per_shelf(container_width);
        let mut shelves = Vec::with_capacity(books.len().div_ceil(per_shelf));

        let mut books = books.into_iter().peekable();
        while books.peek().is_some() {
            shelves.push(Shelf::new(books.by_ref().take(per_shelf).collect()));
        }

        shelves
    }
}
