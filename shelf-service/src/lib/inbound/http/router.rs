use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Gatekeeper;
use auth::HmacSigner;
use auth::RingSigner;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_book::create_book;
use super::handlers::delete_book::delete_book;
use super::handlers::get_book::get_book;
use super::handlers::list_books::list_books;
use super::handlers::list_shelves::list_shelves;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::pages::dashboard;
use super::handlers::pages::login_page;
use super::handlers::update_book::update_book;
use super::middleware::gate_pages;
use super::middleware::require_admin;
use crate::domain::book::ports::BookServicePort;
use crate::domain::shelf::ShelfPacker;

#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<dyn BookServicePort>,
    /// Mints tokens on login and checks them on the admin API
    pub authenticator: Arc<Authenticator<HmacSigner>>,
    /// Checks tokens in front of the admin pages
    pub gatekeeper: Arc<Gatekeeper<RingSigner>>,
    pub shelf_packer: ShelfPacker,
}

pub fn create_router(
    book_service: Arc<dyn BookServicePort>,
    authenticator: Arc<Authenticator<HmacSigner>>,
    gatekeeper: Arc<Gatekeeper<RingSigner>>,
    shelf_packer: ShelfPacker,
) -> Router {
    let state = AppState {
        book_service,
        authenticator,
        gatekeeper,
        shelf_packer,
    };

    let public_routes = Router::new()
        .route("/api/books", get(list_books))
        .route("/api/books/:book_id", get(get_book))
        .route("/api/shelves", get(list_shelves))
        .route("/api/p/:admin_path/auth", post(login))
        .route("/api/p/:admin_path/logout", post(logout));

    let admin_routes = Router::new()
        .route("/api/books", post(create_book))
        .route("/api/books/:book_id", put(update_book).delete(delete_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let page_routes = Router::new()
        .route("/p/:admin_path", get(dashboard))
        .route("/p/:admin_path/login", get(login_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), gate_pages));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(page_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
