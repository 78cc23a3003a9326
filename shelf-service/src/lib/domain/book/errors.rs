use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Book ID must be a number: {0}")]
    InvalidFormat(String),
}

/// Error for BookTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookTitleError {
    #[error("Title must not be empty")]
    Empty,
}

/// Error for CoverUrl validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoverUrlError {
    #[error("Cover URL must not be empty")]
    Empty,
}

/// Error for AuthorName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorNameError {
    #[error("Author name must not be empty")]
    Empty,
}

/// Error for completion date parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FinishedOnError {
    #[error("Completion date must not be empty")]
    Empty,

    #[error("Invalid completion date: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] BookTitleError),

    #[error("Invalid cover URL: {0}")]
    InvalidCoverUrl(#[from] CoverUrlError),

    #[error("Invalid author: {0}")]
    InvalidAuthorName(#[from] AuthorNameError),

    #[error("Invalid completion date: {0}")]
    InvalidFinishedOn(#[from] FinishedOnError),

    #[error("A book needs at least one author")]
    MissingAuthors,

    // Domain-level errors
    #[error("Book not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
