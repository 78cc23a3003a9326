use auth::gate::dashboard_path;
use auth::timing_safe_equal;
use auth::AuthenticationError;
use axum::extract::Path;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::RedirectData;
use crate::inbound::http::router::AppState;

/// HTTP request body for the admin login form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    password: String,
}

/// Exchange the admin password for a session cookie.
///
/// The path segment must match the configured admin path, otherwise the
/// route behaves as if it did not exist.
pub async fn login(
    State(state): State<AppState>,
    Path(admin_path): Path<String>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let Some(configured) = state.gatekeeper.admin_path() else {
        tracing::error!("Admin path is not configured");
        return Err(ApiError::configuration());
    };
    if !state.authenticator.is_configured() {
        tracing::error!("Admin secret is not configured");
        return Err(ApiError::configuration());
    }

    if !timing_safe_equal(admin_path.as_bytes(), configured.as_bytes()) {
        return Err(ApiError::NotFound("Not found".to_string()));
    }

    let result = state
        .authenticator
        .login(&body.password)
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!("Rejected admin login attempt");
                ApiError::Unauthorized("Invalid password".to_string())
            }
            AuthenticationError::Configuration(msg) => {
                tracing::error!(error = %msg, "Admin login misconfigured");
                ApiError::configuration()
            }
            AuthenticationError::Token(err) => {
                tracing::error!(error = %err, "Failed to issue admin token");
                ApiError::InternalServerError("Failed to issue token".to_string())
            }
        })?;

    let cookie = HeaderValue::from_str(&result.cookie)
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    tracing::info!("Admin logged in");

    let data = RedirectData {
        redirect_to: dashboard_path(configured),
    };

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiSuccess::new(StatusCode::OK, data),
    )
        .into_response())
}
