use auth::timing_safe_equal;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::inbound::http::router::AppState;

/// Admin dashboard: every book plus where the admin forms post to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardData {
    pub books_action: String,
    pub logout_action: String,
    pub books: Vec<BookData>,
}

/// Admin login form descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPageData {
    pub action: String,
}

/// `GET /p/:id`, reached only with a valid token (see `gate_pages`).
pub async fn dashboard(
    State(state): State<AppState>,
    Path(admin_path): Path<String>,
) -> Result<ApiSuccess<DashboardData>, ApiError> {
    let configured = check_admin_path(&state, &admin_path)?;

    let books = state
        .book_service
        .list_books()
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DashboardData {
            books_action: "/api/books".to_string(),
            logout_action: format!("/api/p/{}/logout", configured),
            books: books.iter().map(BookData::from).collect(),
        },
    ))
}

/// `GET /p/:id/login`
pub async fn login_page(
    State(state): State<AppState>,
    Path(admin_path): Path<String>,
) -> Result<ApiSuccess<LoginPageData>, ApiError> {
    let configured = check_admin_path(&state, &admin_path)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginPageData {
            action: format!("/api/p/{}/auth", configured),
        },
    ))
}

/// Resolve the configured admin path and match it against the request.
fn check_admin_path<'a>(state: &'a AppState, requested: &str) -> Result<&'a str, ApiError> {
    let Some(configured) = state.gatekeeper.admin_path() else {
        tracing::error!("Admin path is not configured");
        return Err(ApiError::configuration());
    };
    if !state.authenticator.is_configured() {
        tracing::error!("Admin secret is not configured");
        return Err(ApiError::configuration());
    }

    if !timing_safe_equal(requested.as_bytes(), configured.as_bytes()) {
        return Err(ApiError::NotFound("Not found".to_string()));
    }

    Ok(configured)
}
