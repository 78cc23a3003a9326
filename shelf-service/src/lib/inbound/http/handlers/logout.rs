use auth::gate::login_path;
use auth::timing_safe_equal;
use axum::extract::Path;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use super::ApiError;
use super::ApiSuccess;
use super::RedirectData;
use crate::inbound::http::router::AppState;

/// Clear the admin cookie and point the client back to the login page.
pub async fn logout(
    State(state): State<AppState>,
    Path(admin_path): Path<String>,
) -> Result<Response, ApiError> {
    let Some(configured) = state.gatekeeper.admin_path() else {
        tracing::error!("Admin path is not configured");
        return Err(ApiError::configuration());
    };

    if !timing_safe_equal(admin_path.as_bytes(), configured.as_bytes()) {
        return Err(ApiError::NotFound("Not found".to_string()));
    }

    let cookie = HeaderValue::from_str(&state.authenticator.logout_cookie())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    tracing::info!("Admin logged out");

    let data = RedirectData {
        redirect_to: login_path(configured),
    };

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiSuccess::new(StatusCode::OK, data),
    )
        .into_response())
}
