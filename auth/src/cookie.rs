/// Cookie name used when none is configured.
pub const DEFAULT_COOKIE_NAME: &str = "admin_auth";

/// Builds `Set-Cookie` header values carrying the admin token.
///
/// Format: `name=value; HttpOnly; Path=/; Max-Age=N; SameSite=Strict[; Secure]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(name: impl Into<String>, max_age_secs: u64, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age_secs,
            secure,
        }
    }

    /// Header value that stores `token` for the configured window.
    pub fn session_cookie(&self, token: &str) -> String {
        self.header_value(token, self.max_age_secs)
    }

    /// Header value that clears the cookie immediately.
    pub fn clear_cookie(&self) -> String {
        self.header_value("", 0)
    }

    fn header_value(&self, value: &str, max_age_secs: u64) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Strict{}",
            self.name, value, max_age_secs, secure
        )
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME, 60 * 60 * 24, false)
    }
}
