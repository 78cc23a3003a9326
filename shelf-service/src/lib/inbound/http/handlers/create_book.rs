use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::book::errors::BookError;
use crate::domain::book::models::parse_finished_on;
use crate::domain::book::models::AuthorName;
use crate::domain::book::models::BookDraft;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CoverUrl;
use crate::domain::book::models::FormMode;
use crate::inbound::http::router::AppState;

const MISSING_FIELDS: &str = "Missing required fields: title, cover_url, finished_on, and authors";

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    state
        .book_service
        .save_book(FormMode::Create, body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// HTTP request body shared by create and update (raw JSON)
///
/// Accepts both snake_case and the camelCase names used by the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookRequest {
    title: String,
    #[serde(alias = "coverUrl")]
    cover_url: String,
    #[serde(alias = "finishedOn")]
    finished_on: String,
    authors: Vec<String>,
}

impl BookRequest {
    pub(super) fn try_into_draft(self) -> Result<BookDraft, ApiError> {
        let has_author = self.authors.iter().any(|a| !a.trim().is_empty());
        if self.title.trim().is_empty()
            || self.cover_url.trim().is_empty()
            || self.finished_on.trim().is_empty()
            || !has_author
        {
            return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
        }

        let authors = self
            .authors
            .into_iter()
            .filter(|a| !a.trim().is_empty())
            .map(AuthorName::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(BookError::from)?;

        let draft = BookDraft::new(
            BookTitle::new(self.title).map_err(BookError::from)?,
            CoverUrl::new(self.cover_url).map_err(BookError::from)?,
            parse_finished_on(&self.finished_on).map_err(BookError::from)?,
            authors,
        )?;

        Ok(draft)
    }
}
