use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::models::FormMode;

/// Port for book domain service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// List every book, most recently finished first.
    ///
    /// # Returns
    /// Books with their authors
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve a book by identifier.
    ///
    /// # Arguments
    /// * `id` - Book ID
    ///
    /// # Returns
    /// Book entity
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: BookId) -> Result<Book, BookError>;

    /// Create a book, connecting existing authors by name and creating missing ones.
    ///
    /// # Arguments
    /// * `draft` - Validated book fields
    ///
    /// # Returns
    /// Created book entity
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, draft: BookDraft) -> Result<Book, BookError>;

    /// Replace every field of a book, including its author list.
    ///
    /// # Arguments
    /// * `id` - Book ID to update
    /// * `draft` - Validated replacement fields
    ///
    /// # Returns
    /// Updated book entity
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: BookId, draft: BookDraft) -> Result<Book, BookError>;

    /// Delete a book. Authors are kept.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: BookId) -> Result<(), BookError>;

    /// Create or update depending on the admin form mode.
    async fn save_book(&self, mode: FormMode, draft: BookDraft) -> Result<Book, BookError> {
        match mode {
            FormMode::Create => self.create_book(draft).await,
            FormMode::Edit(id) => self.update_book(id, draft).await,
        }
    }
}

/// Persistence operations for the book aggregate.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Retrieve all books ordered by completion date, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve book by identifier.
    ///
    /// # Returns
    /// Optional book entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError>;

    /// Persist a new book and connect-or-create its authors.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, draft: BookDraft) -> Result<Book, BookError>;

    /// Overwrite a book and reset its authors to the draft's list.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: BookId, draft: BookDraft) -> Result<Book, BookError>;

    /// Remove a book from storage.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: BookId) -> Result<(), BookError>;
}
