use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::shelf::DateRange;
use crate::domain::shelf::Shelf;
use crate::inbound::http::router::AppState;

/// Query string of the shelf view
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShelvesQuery {
    /// Measured container width in pixels; absent means 0
    pub width: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelvesResponseData {
    pub books_per_shelf: usize,
    pub shelves: Vec<Shelf<BookData>>,
}

/// Books packed into shelves for the given container width.
pub async fn list_shelves(
    State(state): State<AppState>,
    Query(query): Query<ShelvesQuery>,
) -> Result<ApiSuccess<ShelvesResponseData>, ApiError> {
    let range = DateRange::new(parse_bound(query.from)?, parse_bound(query.to)?);
    let width = parse_width(query.width)?;

    let books = state
        .book_service
        .list_books()
        .await
        .map_err(ApiError::from)?;

    let books: Vec<BookData> = range.apply(books).iter().map(BookData::from).collect();
    let data = ShelvesResponseData {
        books_per_shelf: state.shelf_packer.books_per_shelf(width),
        shelves: state.shelf_packer.pack(books, width),
    };

    Ok(ApiSuccess::new(StatusCode::OK, data))
}

fn parse_width(raw: Option<f64>) -> Result<f64, ApiError> {
    match raw {
        None => Ok(0.0),
        Some(width) if width.is_finite() => Ok(width),
        Some(width) => Err(ApiError::BadRequest(format!("Invalid width: {}", width))),
    }
}

fn parse_bound(raw: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid date: {}", date))),
    }
}
