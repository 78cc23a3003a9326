//! Admin authentication library
//!
//! Provides the stateless admin credential used by the shelf service:
//! - HMAC-SHA256 signed, time-limited tokens (`"<issued_at_millis>.<hex>"`)
//! - Interchangeable signer backends producing identical output
//! - Constant-time comparison and password checking
//! - `Set-Cookie` header building
//! - Page gating decisions
//!
//! # Examples
//!
//! ## Tokens
//! ```
//! use auth::{HmacSigner, TokenService};
//!
//! let tokens = TokenService::new(Some("s3cret".to_string()), HmacSigner::new());
//! let token = tokens.generate().unwrap();
//! assert!(tokens.validate(Some(&token)));
//! ```
//!
//! ## Signers interoperate
//! ```
//! use auth::{HmacSigner, RingSigner, TokenService};
//!
//! let minted = TokenService::new(Some("s3cret".to_string()), HmacSigner::new());
//! let checked = TokenService::new(Some("s3cret".to_string()), RingSigner::new());
//! let token = minted.generate().unwrap();
//! assert!(checked.validate(Some(&token)));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, CookieSettings, HmacSigner};
//!
//! let auth = Authenticator::new(
//!     Some("s3cret".to_string()),
//!     HmacSigner::new(),
//!     CookieSettings::default(),
//! );
//!
//! let result = auth.login("s3cret").unwrap();
//! println!("Set-Cookie: {}", result.cookie);
//!
//! assert!(auth.is_authenticated(Some(&result.access_token)));
//! assert!(auth.login("wrong").is_err());
//! ```

pub mod authenticator;
pub mod compare;
pub mod cookie;
pub mod gate;
pub mod signer;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use compare::timing_safe_equal;
pub use compare::validate_password;
pub use cookie::CookieSettings;
pub use cookie::DEFAULT_COOKIE_NAME;
pub use gate::GateDecision;
pub use gate::Gatekeeper;
pub use signer::HmacSigner;
pub use signer::RingSigner;
pub use signer::Signer;
pub use token::AuthToken;
pub use token::TokenError;
pub use token::TokenService;
