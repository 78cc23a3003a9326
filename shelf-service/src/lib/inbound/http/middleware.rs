use auth::gate::dashboard_path;
use auth::gate::login_path;
use auth::GateDecision;
use axum::extract::MatchedPath;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that rejects admin API calls without a valid auth cookie
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.authenticator.is_configured() {
        tracing::error!("Admin secret is not configured");
        return Err(ApiError::configuration());
    }

    let token = jar.get(state.authenticator.cookie_name()).map(|c| c.value());
    if !state.authenticator.is_authenticated(token) {
        tracing::warn!(uri = %req.uri(), "Rejected admin request without a valid token");
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    }

    Ok(next.run(req).await)
}

/// Middleware that redirects between the admin login page and dashboard
///
/// Gates on the decoded `:admin_path` segment, the same value the page
/// handlers match against.
pub async fn gate_pages(
    State(state): State<AppState>,
    matched: MatchedPath,
    Path(admin_path): Path<String>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let token = jar.get(state.authenticator.cookie_name()).map(|c| c.value());
    let page = if matched.as_str().ends_with("/login") {
        login_path(&admin_path)
    } else {
        dashboard_path(&admin_path)
    };

    match state.gatekeeper.decide(&page, token) {
        GateDecision::Allow => next.run(req).await,
        GateDecision::RedirectToLogin(to) => {
            tracing::debug!(to = %to, "Redirecting to admin login");
            Redirect::temporary(&to).into_response()
        }
        GateDecision::RedirectToDashboard(to) => {
            tracing::debug!(to = %to, "Already authenticated, redirecting to dashboard");
            Redirect::temporary(&to).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::Authenticator;
    use auth::CookieSettings;
    use auth::Gatekeeper;
    use auth::HmacSigner;
    use auth::RingSigner;
    use auth::TokenService;
    use axum::body::Body;
    use axum::http::header;
    use axum::http::Method;
    use axum::http::StatusCode;
    use axum::response::Response;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::domain::book::service::BookService;
    use crate::domain::shelf::ShelfPacker;
    use crate::inbound::http::router::create_router;
    use crate::outbound::repositories::InMemoryBookRepository;

    const SECRET: &str = "correct horse";

    fn app(secret: Option<&str>) -> Router {
        let secret = secret.map(str::to_string);
        create_router(
            Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new()))),
            Arc::new(Authenticator::new(
                secret.clone(),
                HmacSigner::new(),
                CookieSettings::default(),
            )),
            Arc::new(Gatekeeper::new(
                Some("hidden".to_string()),
                TokenService::new(secret, RingSigner::new()),
            )),
            ShelfPacker::default(),
        )
    }

    fn cookie() -> String {
        let token = TokenService::new(Some(SECRET.to_string()), HmacSigner::new())
            .generate()
            .unwrap();
        format!("admin_auth={}", token)
    }

    fn request(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_admin_api_without_cookie() {
        let response = app(Some(SECRET))
            .oneshot(request(Method::DELETE, "/api/books/1", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["data"]["message"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_admin_api_with_forged_cookie() {
        let response = app(Some(SECRET))
            .oneshot(request(
                Method::DELETE,
                "/api/books/1",
                Some("admin_auth=1700000000000.deadbeef"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_api_with_valid_cookie_reaches_handler() {
        let response = app(Some(SECRET))
            .oneshot(request(Method::DELETE, "/api/books/1", Some(&cookie())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_api_without_secret_is_configuration_error() {
        let response = app(None)
            .oneshot(request(Method::DELETE, "/api/books/1", Some(&cookie())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["data"]["message"], "Server configuration error");
    }

    #[tokio::test]
    async fn test_dashboard_redirects_to_login() {
        let response = app(Some(SECRET))
            .oneshot(request(Method::GET, "/p/hidden", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/p/hidden/login");
    }

    #[tokio::test]
    async fn test_login_page_redirects_to_dashboard() {
        let response = app(Some(SECRET))
            .oneshot(request(Method::GET, "/p/hidden/login", Some(&cookie())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/p/hidden");
    }

    #[tokio::test]
    async fn test_pages_pass_through() {
        let router = app(Some(SECRET));

        let response = router
            .clone()
            .oneshot(request(Method::GET, "/p/hidden", Some(&cookie())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(request(Method::GET, "/p/hidden/login", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["action"], "/api/p/hidden/auth");
    }

    #[tokio::test]
    async fn test_encoded_admin_path_is_gated() {
        let router = app(Some(SECRET));

        let response = router
            .clone()
            .oneshot(request(Method::GET, "/p/%68idden", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/p/hidden/login");

        let response = router
            .oneshot(request(Method::GET, "/p/%68idden/login", Some(&cookie())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/p/hidden");
    }

    #[tokio::test]
    async fn test_unknown_admin_path_is_not_found() {
        let response = app(Some(SECRET))
            .oneshot(request(Method::GET, "/p/guess", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
