use std::cmp::Reverse;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Author;
use crate::domain::book::models::AuthorId;
use crate::domain::book::models::AuthorName;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::ports::BookRepository;

/// Process-local book store.
///
/// Used when no database URL is configured and by the API tests. Same
/// ordering and connect-or-create semantics as the PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryBookRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    books: Vec<Book>,
    authors: Vec<Author>,
    last_book_id: i64,
    last_author_id: i64,
}

impl MemoryState {
    fn connect_or_create(&mut self, names: &[AuthorName]) -> Vec<Author> {
        names
            .iter()
            .map(|name| {
                if let Some(existing) = self.authors.iter().find(|a| &a.name == name) {
                    return existing.clone();
                }
                self.last_author_id += 1;
                let author = Author {
                    id: AuthorId(self.last_author_id),
                    name: name.clone(),
                };
                self.authors.push(author.clone());
                author
            })
            .collect()
    }
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        let state = self.state.read().await;

        let mut books = state.books.clone();
        books.sort_by_key(|b| Reverse((b.finished_on, b.id)));

        Ok(books)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        let state = self.state.read().await;
        Ok(state.books.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, BookError> {
        let mut state = self.state.write().await;

        state.last_book_id += 1;
        let authors = state.connect_or_create(&draft.authors);
        let book = Book {
            id: BookId(state.last_book_id),
            title: draft.title,
            cover_url: draft.cover_url,
            finished_on: draft.finished_on,
            authors,
        };
        state.books.push(book.clone());

        Ok(book)
    }

    async fn update(&self, id: BookId, draft: BookDraft) -> Result<Book, BookError> {
        let mut state = self.state.write().await;

        let Some(index) = state.books.iter().position(|b| b.id == id) else {
            return Err(BookError::NotFound(id.to_string()));
        };

        let authors = state.connect_or_create(&draft.authors);
        let book = &mut state.books[index];
        book.title = draft.title;
        book.cover_url = draft.cover_url;
        book.finished_on = draft.finished_on;
        book.authors = authors;

        Ok(book.clone())
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        let mut state = self.state.write().await;

        let before = state.books.len();
        state.books.retain(|b| b.id != id);
        if state.books.len() == before {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
