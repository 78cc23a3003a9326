use serde::Serialize;

/// Fixed geometry of a rendered shelf, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfLayout {
    /// Width of one book spine
    pub book_width: f64,
    /// Margin on each side of the shelf
    pub side_margin: f64,
    /// Gap between neighbouring books
    pub inter_book_gap: f64,
}

impl ShelfLayout {
    pub fn new(book_width: f64, side_margin: f64, inter_book_gap: f64) -> Self {
        Self {
            book_width,
            side_margin,
            inter_book_gap,
        }
    }

    /// Width left for books once both side margins are taken.
    pub fn available_space(&self, container_width: f64) -> f64 {
        container_width - 2.0 * self.side_margin
    }

    /// Horizontal space one book claims including its trailing gap.
    pub fn stride(&self) -> f64 {
        self.book_width + self.inter_book_gap
    }
}

impl Default for ShelfLayout {
    fn default() -> Self {
        Self::new(96.0, 48.0, 48.0)
    }
}

/// One row of books, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Shelf<T> {
    books: Vec<T>,
}

impl<T> Shelf<T> {
    pub fn new(books: Vec<T>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[T] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn into_books(self) -> Vec<T> {
        self.books
    }

    /// Rendered width: one book width plus gap per book, minus the trailing gap.
    pub fn rendered_width(&self, layout: &ShelfLayout) -> f64 {
        if self.books.is_empty() {
            return 0.0;
        }
        self.books.len() as f64 * layout.stride() - layout.inter_book_gap
    }
}
