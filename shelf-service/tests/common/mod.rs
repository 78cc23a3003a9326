#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Gatekeeper;
use auth::HmacSigner;
use auth::RingSigner;
use auth::TokenService;
use auth::DEFAULT_COOKIE_NAME;
use serde_json::json;
use shelf_service::config::AdminConfig;
use shelf_service::config::ShelfConfig;
use shelf_service::domain::book::ports::BookServicePort;
use shelf_service::domain::book::service::BookService;
use shelf_service::domain::shelf::ShelfPacker;
use shelf_service::inbound::http::router::create_router;
use shelf_service::outbound::repositories::InMemoryBookRepository;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const ADMIN_PASSWORD: &str = "test-admin-password";
pub const ADMIN_PATH: &str = "s3cr3t-panel";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

pub fn admin_config(password: Option<&str>, path: Option<&str>) -> AdminConfig {
    AdminConfig {
        password: password.map(str::to_string),
        path: path.map(str::to_string),
        secure_cookies: false,
        cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        token_max_age_secs: 60 * 60 * 24,
    }
}

impl TestApp {
    /// Spawn the application with an in-memory store and full admin configuration
    pub async fn spawn() -> Self {
        Self::spawn_with(
            admin_config(Some(ADMIN_PASSWORD), Some(ADMIN_PATH)),
            Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new()))),
        )
        .await
    }

    /// Spawn the application with explicit admin settings and book service
    pub async fn spawn_with(admin: AdminConfig, book_service: Arc<dyn BookServicePort>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(
            admin.password.clone(),
            HmacSigner::new(),
            admin.cookie_settings(),
        ));
        let gatekeeper = Arc::new(Gatekeeper::new(
            admin.path.clone(),
            TokenService::new(admin.password.clone(), RingSigner::new())
                .with_max_age(Duration::from_secs(admin.token_max_age_secs)),
        ));
        let shelf_packer = ShelfPacker::new(ShelfConfig::default().layout());

        let router = create_router(book_service, authenticator, gatekeeper, shelf_packer);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(&format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(&format!("{}{}", self.address, path))
    }

    /// Log in with the admin password; the client keeps the cookie
    pub async fn login(&self) -> reqwest::Response {
        self.post(&format!("/api/p/{}/auth", ADMIN_PATH))
            .json(&json!({ "password": ADMIN_PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a book as admin and return its id
    pub async fn create_book(&self, title: &str, finished_on: &str, authors: &[&str]) -> i64 {
        let response = self
            .post("/api/books")
            .json(&json!({
                "title": title,
                "cover_url": format!("https://covers.example/{}.jpg", title.replace(' ', "-")),
                "finished_on": finished_on,
                "authors": authors,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing book id")
    }
}

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    postgres_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name
    ///
    /// Returns `None` when DATABASE_URL is not set.
    pub async fn try_new() -> Option<Self> {
        let postgres_url = std::env::var("DATABASE_URL").ok()?;
        let db_name = format!(
            "test_shelf_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            postgres_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let postgres_url = self.postgres_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
