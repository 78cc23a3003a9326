use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service implementation for book operations.
///
/// Concrete implementation of BookServicePort with dependency injection.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    /// Create a new book service.
    ///
    /// # Arguments
    /// * `repository` - Book persistence implementation
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list().await
    }

    async fn get_book(&self, id: BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))
    }

    async fn create_book(&self, draft: BookDraft) -> Result<Book, BookError> {
        let book = self.repository.create(draft).await?;
        tracing::info!(
            book_id = %book.id,
            title = %book.title,
            authors = book.authors.len(),
            "Book created"
        );
        Ok(book)
    }

    async fn update_book(&self, id: BookId, draft: BookDraft) -> Result<Book, BookError> {
        let book = self.repository.update(id, draft).await?;
        tracing::info!(book_id = %book.id, title = %book.title, "Book updated");
        Ok(book)
    }

    async fn delete_book(&self, id: BookId) -> Result<(), BookError> {
        self.repository.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}
