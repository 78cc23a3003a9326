pub mod auth_token;
pub mod errors;
pub mod service;

pub use auth_token::AuthToken;
pub use errors::TokenError;
pub use service::TokenService;
pub use service::DEFAULT_MAX_AGE;
