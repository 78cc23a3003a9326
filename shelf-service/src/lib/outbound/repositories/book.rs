use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgConnection;
use sqlx::PgPool;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Author;
use crate::domain::book::models::AuthorId;
use crate::domain::book::models::AuthorName;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CoverUrl;
use crate::domain::book::ports::BookRepository;

const SELECT_BOOKS: &str = r#"
    SELECT b.id AS book_id, b.title, b.cover_url, b.finished_on,
           a.id AS author_id, a.name AS author_name
    FROM books b
    LEFT JOIN book_authors ba ON ba.book_id = b.id
    LEFT JOIN authors a ON a.id = ba.author_id
"#;

const ORDER_BOOKS: &str = "ORDER BY b.finished_on DESC, b.id DESC, ba.position ASC";

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect-or-create each author by name and link it to the book in order.
    async fn connect_authors(
        conn: &mut PgConnection,
        book_id: i64,
        authors: &[AuthorName],
    ) -> Result<(), BookError> {
        for (position, name) in authors.iter().enumerate() {
            let (author_id,): (i64,) = sqlx::query_as(
                r#"
                INSERT INTO authors (name)
                VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id
                "#,
            )
            .bind(name.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(database_error)?;

            sqlx::query(
                r#"
                INSERT INTO book_authors (book_id, author_id, position)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(book_id)
            .bind(author_id)
            .bind(position as i32)
            .execute(&mut *conn)
            .await
            .map_err(database_error)?;
        }

        Ok(())
    }

    async fn fetch_existing(&self, id: i64) -> Result<Book, BookError> {
        self.find_by_id(BookId(id))
            .await?
            .ok_or(BookError::NotFound(id.to_string()))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookAuthorRow {
    book_id: i64,
    title: String,
    cover_url: String,
    finished_on: DateTime<Utc>,
    author_id: Option<i64>,
    author_name: Option<String>,
}

/// Fold joined rows (one per book/author pair, grouped by book) into books.
fn group_rows(rows: Vec<BookAuthorRow>) -> Result<Vec<Book>, BookError> {
    let mut books: Vec<Book> = Vec::new();

    for row in rows {
        let author = match (row.author_id, row.author_name) {
            (Some(id), Some(name)) => Some(Author {
                id: AuthorId(id),
                name: AuthorName::new(name)?,
            }),
            _ => None,
        };

        match books.last_mut() {
            Some(book) if book.id.0 == row.book_id => book.authors.extend(author),
            _ => books.push(Book {
                id: BookId(row.book_id),
                title: BookTitle::new(row.title)?,
                cover_url: CoverUrl::new(row.cover_url)?,
                finished_on: row.finished_on,
                authors: author.into_iter().collect(),
            }),
        }
    }

    Ok(books)
}

fn database_error(e: sqlx::Error) -> BookError {
    BookError::DatabaseError(e.to_string())
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        let rows: Vec<BookAuthorRow> = sqlx::query_as(&format!("{} {}", SELECT_BOOKS, ORDER_BOOKS))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        group_rows(rows)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        let rows: Vec<BookAuthorRow> = sqlx::query_as(&format!(
            "{} WHERE b.id = $1 {}",
            SELECT_BOOKS, ORDER_BOOKS
        ))
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(group_rows(rows)?.into_iter().next())
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, BookError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let (book_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO books (title, cover_url, finished_on)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(draft.title.as_str())
        .bind(draft.cover_url.as_str())
        .bind(draft.finished_on)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        Self::connect_authors(&mut tx, book_id, &draft.authors).await?;

        tx.commit().await.map_err(database_error)?;

        self.fetch_existing(book_id).await
    }

    async fn update(&self, id: BookId, draft: BookDraft) -> Result<Book, BookError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, cover_url = $3, finished_on = $4
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(draft.title.as_str())
        .bind(draft.cover_url.as_str())
        .bind(draft.finished_on)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        Self::connect_authors(&mut tx, id.0, &draft.authors).await?;

        tx.commit().await.map_err(database_error)?;

        self.fetch_existing(id.0).await
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn row(book_id: i64, author: Option<(i64, &str)>) -> BookAuthorRow {
        BookAuthorRow {
            book_id,
            title: format!("Book {}", book_id),
            cover_url: format!("https://covers.example/{}.jpg", book_id),
            finished_on: Utc.with_ymd_and_hms(2024, 1, book_id as u32, 0, 0, 0).unwrap(),
            author_id: author.map(|(id, _)| id),
            author_name: author.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn test_group_rows_merges_authors() {
        let books = group_rows(vec![
            row(2, Some((10, "Terry Pratchett"))),
            row(2, Some((11, "Neil Gaiman"))),
            row(1, Some((10, "Terry Pratchett"))),
        ])
        .unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, BookId(2));
        let names: Vec<&str> = books[0].authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Terry Pratchett", "Neil Gaiman"]);
        assert_eq!(books[1].authors.len(), 1);
    }

    #[test]
    fn test_group_rows_book_without_authors() {
        let books = group_rows(vec![row(3, None)]).unwrap();
        assert_eq!(books.len(), 1);
        assert!(books[0].authors.is_empty());
    }

    #[test]
    fn test_group_rows_empty() {
        assert!(group_rows(Vec::new()).unwrap().is_empty());
    }
}
