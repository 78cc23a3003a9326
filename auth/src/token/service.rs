use std::time::Duration;

use chrono::Utc;

use super::auth_token::AuthToken;
use super::errors::TokenError;
use crate::compare::timing_safe_equal;
use crate::signer::Signer;

/// Default token lifetime (24 hours).
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24);

/// Issues and validates stateless admin tokens.
///
/// A token is `"<issued_at_millis>.<hex(HMAC-SHA256(secret, issued_at_millis))>"`.
/// Nothing is stored server-side: validity is re-derived from the secret and
/// the current time on every check.
pub struct TokenService<S: Signer> {
    secret: Option<String>,
    max_age_millis: i64,
    signer: S,
}

impl<S: Signer> TokenService<S> {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Shared admin secret; `None` or empty means not configured
    /// * `signer` - HMAC-SHA256 backend
    ///
    /// # Returns
    /// TokenService with the default 24 hour lifetime
    pub fn new(secret: Option<String>, signer: S) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            max_age_millis: DEFAULT_MAX_AGE.as_millis() as i64,
            signer,
        }
    }

    /// Override the token lifetime.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age_millis = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
        self
    }

    /// Token lifetime in milliseconds.
    pub fn max_age_millis(&self) -> i64 {
        self.max_age_millis
    }

    /// Whether a secret is configured.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Issue a token stamped with the current time.
    ///
    /// # Errors
    /// * `MissingSecret` - No secret configured
    /// * `SigningFailed` - Signer backend failed
    pub fn generate(&self) -> Result<String, TokenError> {
        self.generate_at(Utc::now().timestamp_millis())
    }

    /// Issue a token stamped with `now_millis`.
    ///
    /// # Errors
    /// * `MissingSecret` - No secret configured
    /// * `SigningFailed` - Signer backend failed
    pub fn generate_at(&self, now_millis: i64) -> Result<String, TokenError> {
        let secret = self.secret.as_deref().ok_or(TokenError::MissingSecret)?;
        let issued_at = now_millis.to_string();
        let signature = self.signature(secret, &issued_at)?;

        Ok(AuthToken::new(now_millis, signature).to_string())
    }

    /// Check a token against the current time.
    pub fn validate(&self, token: Option<&str>) -> bool {
        self.validate_at(token, Utc::now().timestamp_millis())
    }

    /// Check a token against `now_millis`.
    ///
    /// Fails closed: any missing input, malformed token, expired or
    /// future-dated timestamp, or signature mismatch yields `false`.
    pub fn validate_at(&self, token: Option<&str>, now_millis: i64) -> bool {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return false;
        };
        let Some(secret) = self.secret.as_deref() else {
            return false;
        };

        let token = match token.parse::<AuthToken>() {
            Ok(token) => token,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected token");
                return false;
            }
        };

        let Some(elapsed) = now_millis.checked_sub(token.issued_at_millis()) else {
            return false;
        };
        if elapsed < 0 {
            tracing::debug!(elapsed_ms = elapsed, "Rejected future-dated token");
            return false;
        }
        if elapsed > self.max_age_millis {
            tracing::debug!(elapsed_ms = elapsed, "Rejected expired token");
            return false;
        }

        let expected = match self.signature(secret, token.signed_payload()) {
            Ok(signature) => signature,
            Err(e) => {
                tracing::error!(error = %e, "Failed to recompute token signature");
                return false;
            }
        };

        timing_safe_equal(token.signature().as_bytes(), expected.as_bytes())
    }

    fn signature(&self, secret: &str, message: &str) -> Result<String, TokenError> {
        let tag = self.signer.sign(secret.as_bytes(), message.as_bytes())?;
        Ok(hex::encode(tag))
    }
}
