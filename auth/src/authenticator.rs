use crate::compare::validate_password;
use crate::cookie::CookieSettings;
use crate::signer::Signer;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides the login/logout operations used by HTTP handlers: check the
/// submitted password against the configured secret, mint a signed token and
/// wrap it in a cookie header.
pub struct Authenticator<S: Signer> {
    secret: Option<String>,
    tokens: TokenService<S>,
    cookies: CookieSettings,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed admin token
    pub access_token: String,

    /// `Set-Cookie` header value carrying the token
    pub cookie: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Token error: {0}")]
    Token(TokenError),
}

impl From<TokenError> for AuthenticationError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingSecret => AuthenticationError::Configuration(err.to_string()),
            other => AuthenticationError::Token(other),
        }
    }
}

impl<S: Signer> Authenticator<S> {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Admin secret, used both as password and HMAC key
    /// * `signer` - HMAC-SHA256 backend for token signatures
    /// * `cookies` - Cookie attributes; `max_age_secs` also bounds token age
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(secret: Option<String>, signer: S, cookies: CookieSettings) -> Self {
        let secret = secret.filter(|s| !s.is_empty());
        let tokens = TokenService::new(secret.clone(), signer)
            .with_max_age(std::time::Duration::from_secs(cookies.max_age_secs));

        Self {
            secret,
            tokens,
            cookies,
        }
    }

    /// Whether an admin secret is configured.
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Verify the admin password and issue a token.
    ///
    /// # Arguments
    /// * `password` - Submitted password
    ///
    /// # Returns
    /// AuthenticationResult with token and cookie header
    ///
    /// # Errors
    /// * `Configuration` - No admin secret configured
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token signing failed
    pub fn login(&self, password: &str) -> Result<AuthenticationResult, AuthenticationError> {
        let Some(secret) = self.secret.as_deref() else {
            return Err(TokenError::MissingSecret.into());
        };

        if !validate_password(password, Some(secret)) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.tokens.generate()?;
        let cookie = self.cookies.session_cookie(&access_token);

        Ok(AuthenticationResult {
            access_token,
            cookie,
        })
    }

    /// `Set-Cookie` header value that logs the client out.
    pub fn logout_cookie(&self) -> String {
        self.cookies.clear_cookie()
    }

    /// Check a token taken from the auth cookie.
    pub fn is_authenticated(&self, token: Option<&str>) -> bool {
        self.tokens.validate(token)
    }

    /// Name of the auth cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookies.name
    }

    pub fn tokens(&self) -> &TokenService<S> {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::HmacSigner;

    fn authenticator(secret: Option<&str>) -> Authenticator<HmacSigner> {
        Authenticator::new(
            secret.map(str::to_string),
            HmacSigner::new(),
            CookieSettings::default(),
        )
    }

    #[test]
    fn test_login_success() {
        let authenticator = authenticator(Some("open sesame"));

        let result = authenticator
            .login("open sesame")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert!(result
            .cookie
            .starts_with(&format!("admin_auth={};", result.access_token)));
        assert!(authenticator.is_authenticated(Some(&result.access_token)));
    }

    #[test]
    fn test_login_invalid_password() {
        let authenticator = authenticator(Some("open sesame"));

        for attempt in ["open sesam", "", "OPEN SESAME"] {
            assert!(matches!(
                authenticator.login(attempt),
                Err(AuthenticationError::InvalidCredentials)
            ));
        }
    }

    #[test]
    fn test_login_without_secret_is_configuration_error() {
        for authenticator in [authenticator(None), authenticator(Some(""))] {
            assert!(!authenticator.is_configured());
            assert!(matches!(
                authenticator.login("anything"),
                Err(AuthenticationError::Configuration(_))
            ));
            assert!(matches!(
                authenticator.login(""),
                Err(AuthenticationError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_token_age_follows_cookie_window() {
        let authenticator = Authenticator::new(
            Some("open sesame".to_string()),
            HmacSigner::new(),
            CookieSettings::new("admin_auth", 60, false),
        );
        assert_eq!(authenticator.tokens().max_age_millis(), 60_000);
    }

    #[test]
    fn test_is_authenticated_rejects_garbage() {
        let authenticator = authenticator(Some("open sesame"));
        assert!(!authenticator.is_authenticated(None));
        assert!(!authenticator.is_authenticated(Some("authenticated")));
    }

    #[test]
    fn test_logout_cookie() {
        let authenticator = authenticator(Some("open sesame"));
        assert_eq!(
            authenticator.logout_cookie(),
            "admin_auth=; HttpOnly; Path=/; Max-Age=0; SameSite=Strict"
        );
        assert_eq!(authenticator.cookie_name(), "admin_auth");
    }
}
