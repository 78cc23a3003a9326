use std::env;

use auth::CookieSettings;
use auth::DEFAULT_COOKIE_NAME;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::shelf::ShelfLayout;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub shelf: ShelfConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// PostgreSQL URL; the in-memory store is used when absent
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Shared admin secret: the login password and the token signing key
    pub password: Option<String>,
    /// Secret path segment of the admin pages (`/p/{path}`)
    pub path: Option<String>,
    pub secure_cookies: bool,
    pub cookie_name: String,
    pub token_max_age_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShelfConfig {
    pub book_width: f64,
    pub side_margin: f64,
    pub inter_book_gap: f64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ADMIN__PASSWORD, ADMIN__PATH, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    ///
    /// `admin.secure_cookies` defaults to true when RUN_MODE is "production".
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 3000)?
            .set_default("admin.secure_cookies", run_mode == "production")?
            .set_default("admin.cookie_name", DEFAULT_COOKIE_NAME)?
            .set_default("admin.token_max_age_secs", 60 * 60 * 24)?
            .set_default("shelf.book_width", 96.0)?
            .set_default("shelf.side_margin", 48.0)?
            .set_default("shelf.inter_book_gap", 48.0)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on unprefixed environment variables (with __ as separator)
            // Example: ADMIN__PASSWORD=... overrides admin.password
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

impl AdminConfig {
    pub fn cookie_settings(&self) -> CookieSettings {
        CookieSettings::new(
            self.cookie_name.clone(),
            self.token_max_age_secs,
            self.secure_cookies,
        )
    }
}

impl ShelfConfig {
    pub fn layout(&self) -> ShelfLayout {
        ShelfLayout::new(self.book_width, self.side_margin, self.inter_book_gap)
    }
}

impl Default for ShelfConfig {
    fn default() -> Self {
        let layout = ShelfLayout::default();
        Self {
            book_width: layout.book_width,
            side_margin: layout.side_margin,
            inter_book_gap: layout.inter_book_gap,
        }
    }
}
