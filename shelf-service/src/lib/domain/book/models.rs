use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::domain::book::errors::AuthorNameError;
use crate::domain::book::errors::BookError;
use crate::domain::book::errors::BookIdError;
use crate::domain::book::errors::BookTitleError;
use crate::domain::book::errors::CoverUrlError;
use crate::domain::book::errors::FinishedOnError;

/// Book aggregate entity.
///
/// A finished book on the shelf together with its ordered authors.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub cover_url: CoverUrl,
    pub finished_on: DateTime<Utc>,
    pub authors: Vec<Author>,
}

/// Book author. Names are unique across the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    pub name: AuthorName,
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub i64);

impl BookId {
    /// Parse a book ID from a path segment.
    ///
    /// # Arguments
    /// * `s` - Decimal integer string
    ///
    /// # Returns
    /// Parsed BookId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not an integer
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        s.parse::<i64>()
            .map(BookId)
            .map_err(|_| BookIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Author unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorId(pub i64);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Book title value type. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: String) -> Result<Self, BookTitleError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookTitleError::Empty);
        }
        Ok(Self(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Cover image URL value type. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverUrl(String);

impl CoverUrl {
    pub fn new(url: String) -> Result<Self, CoverUrlError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CoverUrlError::Empty);
        }
        Ok(Self(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Author name value type
///
/// Trimmed and never blank; the unique key used to connect or create authors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(name: String) -> Result<Self, AuthorNameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthorNameError::Empty);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parse a completion date.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
///
/// # Errors
/// * `Empty` - Input is blank
/// * `InvalidFormat` - Neither format matched
pub fn parse_finished_on(raw: &str) -> Result<DateTime<Utc>, FinishedOnError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FinishedOnError::Empty);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| FinishedOnError::InvalidFormat(raw.to_string()))
}

/// Validated fields of a book, used for both creation and full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: BookTitle,
    pub cover_url: CoverUrl,
    pub finished_on: DateTime<Utc>,
    pub authors: Vec<AuthorName>,
}

impl BookDraft {
    /// Create a validated draft.
    ///
    /// Duplicate author names keep their first position.
    ///
    /// # Errors
    /// * `MissingAuthors` - No author given
    pub fn new(
        title: BookTitle,
        cover_url: CoverUrl,
        finished_on: DateTime<Utc>,
        authors: Vec<AuthorName>,
    ) -> Result<Self, BookError> {
        let mut unique: Vec<AuthorName> = Vec::with_capacity(authors.len());
        for author in authors {
            if !unique.contains(&author) {
                unique.push(author);
            }
        }

        if unique.is_empty() {
            return Err(BookError::MissingAuthors);
        }

        Ok(Self {
            title,
            cover_url,
            finished_on,
            authors: unique,
        })
    }
}

/// Whether an admin form creates a new book or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BookId),
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn names(raw: &[&str]) -> Vec<AuthorName> {
        raw.iter()
            .map(|n| AuthorName::new(n.to_string()).unwrap())
            .collect()
    }

    #[test]
    fn test_book_id_from_string() {
        assert_eq!(BookId::from_string("42"), Ok(BookId(42)));
        assert!(BookId::from_string("abc").is_err());
        assert!(BookId::from_string("").is_err());
        assert!(BookId::from_string("4.2").is_err());
    }

    #[test]
    fn test_value_objects_reject_blank() {
        assert_eq!(BookTitle::new("  ".to_string()), Err(BookTitleError::Empty));
        assert_eq!(CoverUrl::new(String::new()), Err(CoverUrlError::Empty));
        assert_eq!(AuthorName::new("\t".to_string()), Err(AuthorNameError::Empty));
    }

    #[test]
    fn test_value_objects_trim() {
        assert_eq!(BookTitle::new(" Dune ".to_string()).unwrap().as_str(), "Dune");
        assert_eq!(
            AuthorName::new(" Frank Herbert".to_string()).unwrap().as_str(),
            "Frank Herbert"
        );
    }

    #[test]
    fn test_parse_finished_on() {
        assert_eq!(
            parse_finished_on("2024-03-01"),
            Ok(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_finished_on("2024-03-01T12:30:00+02:00"),
            Ok(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())
        );
        assert_eq!(parse_finished_on(""), Err(FinishedOnError::Empty));
        assert!(matches!(
            parse_finished_on("yesterday"),
            Err(FinishedOnError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_draft_dedups_authors_in_order() {
        let draft = BookDraft::new(
            BookTitle::new("Good Omens".to_string()).unwrap(),
            CoverUrl::new("https://covers.example/omens.jpg".to_string()).unwrap(),
            Utc::now(),
            names(&["Terry Pratchett", "Neil Gaiman", "Terry Pratchett"]),
        )
        .unwrap();

        assert_eq!(draft.authors, names(&["Terry Pratchett", "Neil Gaiman"]));
    }

    #[test]
    fn test_draft_requires_author() {
        let result = BookDraft::new(
            BookTitle::new("Anonymous".to_string()).unwrap(),
            CoverUrl::new("https://covers.example/a.jpg".to_string()).unwrap(),
            Utc::now(),
            Vec::new(),
        );
        assert!(matches!(result, Err(BookError::MissingAuthors)));
    }
}
