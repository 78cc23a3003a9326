use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::book::errors::BookError;
use crate::book::models::Author;
use crate::book::models::Book;

pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod list_shelves;
pub mod login;
pub mod logout;
pub mod pages;
pub mod update_book;

/// Message returned whenever required admin settings are missing.
pub const CONFIGURATION_ERROR: &str = "Server configuration error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl ApiError {
    /// 500 for missing admin settings, with a fixed client-facing message.
    pub fn configuration() -> Self {
        ApiError::InternalServerError(CONFIGURATION_ERROR.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BookError::InvalidBookId(_) => ApiError::BadRequest(err.to_string()),
            BookError::InvalidTitle(_)
            | BookError::InvalidCoverUrl(_)
            | BookError::InvalidAuthorName(_)
            | BookError::InvalidFinishedOn(_)
            | BookError::MissingAuthors => ApiError::UnprocessableEntity(err.to_string()),
            BookError::DatabaseError(_) => {
                tracing::error!(error = %err, "Book store failure");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Where the client should navigate after a login or logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectData {
    pub redirect_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub id: i64,
    pub title: String,
    pub cover_url: String,
    pub finished_on: DateTime<Utc>,
    pub authors: Vec<AuthorData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorData {
    pub id: i64,
    pub name: String,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.0,
            title: book.title.as_str().to_string(),
            cover_url: book.cover_url.as_str().to_string(),
            finished_on: book.finished_on,
            authors: book.authors.iter().map(AuthorData::from).collect(),
        }
    }
}

impl From<&Author> for AuthorData {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.0,
            name: author.name.as_str().to_string(),
        }
    }
}
