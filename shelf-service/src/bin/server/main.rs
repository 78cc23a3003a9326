use std::sync::Arc;

use auth::Authenticator;
use auth::Gatekeeper;
use auth::HmacSigner;
use auth::RingSigner;
use auth::TokenService;
use shelf_service::config::Config;
use shelf_service::domain::book::ports::BookServicePort;
use shelf_service::domain::book::service::BookService;
use shelf_service::domain::shelf::ShelfPacker;
use shelf_service::inbound::http::router::create_router;
use shelf_service::outbound::repositories::InMemoryBookRepository;
use shelf_service::outbound::repositories::PostgresBookRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "shelf-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.url.is_some(),
        secure_cookies = config.admin.secure_cookies,
        "Configuration loaded"
    );

    if config.admin.password.as_deref().map_or(true, str::is_empty) {
        tracing::error!("ADMIN__PASSWORD is not set; admin login is disabled");
    }
    if config.admin.path.as_deref().map_or(true, str::is_empty) {
        tracing::error!("ADMIN__PATH is not set; admin pages are unreachable");
    }

    let book_service: Arc<dyn BookServicePort> = match config.database.url.as_deref() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(BookService::new(Arc::new(PostgresBookRepository::new(pg_pool))))
        }
        None => {
            tracing::warn!("No database URL configured, books are kept in memory");
            Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new())))
        }
    };

    let cookie_settings = config.admin.cookie_settings();
    let token_max_age = std::time::Duration::from_secs(config.admin.token_max_age_secs);

    let authenticator = Arc::new(Authenticator::new(
        config.admin.password.clone(),
        HmacSigner::new(),
        cookie_settings,
    ));
    let gatekeeper = Arc::new(Gatekeeper::new(
        config.admin.path.clone(),
        TokenService::new(config.admin.password.clone(), RingSigner::new())
            .with_max_age(token_max_age),
    ));
    let shelf_packer = ShelfPacker::new(config.shelf.layout());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(book_service, authenticator, gatekeeper, shelf_packer);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
    }

    Ok(())
}
