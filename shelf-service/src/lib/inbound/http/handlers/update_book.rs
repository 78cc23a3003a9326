use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::create_book::BookRequest;
use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::domain::book::models::FormMode;
use crate::inbound::http::router::AppState;

/// Replace every field of an existing book, including its author list.
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Json(body): Json<BookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(BookError::from)?;

    state
        .book_service
        .save_book(FormMode::Edit(book_id), body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
