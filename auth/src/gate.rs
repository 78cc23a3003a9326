use chrono::Utc;

use crate::signer::Signer;
use crate::token::TokenService;

/// Outcome of gating a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through.
    Allow,
    /// Protected page without a valid token; carries the login path.
    RedirectToLogin(String),
    /// Login page with a valid token; carries the dashboard path.
    RedirectToDashboard(String),
}

/// Decides access to the admin pages under `/p/{admin_path}`.
///
/// Only two paths are governed: the dashboard `/p/{admin_path}` requires a
/// valid token, and the login page `/p/{admin_path}/login` bounces
/// already-authenticated clients to the dashboard. Every other path is
/// allowed. Safe to share across concurrent requests.
pub struct Gatekeeper<S: Signer> {
    admin_path: Option<String>,
    tokens: TokenService<S>,
}

impl<S: Signer> Gatekeeper<S> {
    pub fn new(admin_path: Option<String>, tokens: TokenService<S>) -> Self {
        Self {
            admin_path: admin_path.filter(|p| !p.is_empty()),
            tokens,
        }
    }

    /// Configured admin path segment.
    pub fn admin_path(&self) -> Option<&str> {
        self.admin_path.as_deref()
    }

    /// Dashboard path, if an admin path is configured.
    pub fn dashboard_path(&self) -> Option<String> {
        self.admin_path.as_deref().map(dashboard_path)
    }

    /// Login page path, if an admin path is configured.
    pub fn login_path(&self) -> Option<String> {
        self.admin_path.as_deref().map(login_path)
    }

    /// Gate `path` using the current time.
    pub fn decide(&self, path: &str, token: Option<&str>) -> GateDecision {
        self.decide_at(path, token, Utc::now().timestamp_millis())
    }

    /// Gate `path` as of `now_millis`.
    ///
    /// With no admin path or no secret configured every request is allowed;
    /// the page handlers report the configuration error.
    pub fn decide_at(&self, path: &str, token: Option<&str>, now_millis: i64) -> GateDecision {
        let Some(admin_path) = self.admin_path.as_deref() else {
            tracing::error!("Admin path is not configured");
            return GateDecision::Allow;
        };
        if !self.tokens.has_secret() {
            tracing::error!("Admin secret is not configured");
            return GateDecision::Allow;
        }

        let dashboard = dashboard_path(admin_path);
        let login = login_path(admin_path);

        if path == dashboard && !self.tokens.validate_at(token, now_millis) {
            return GateDecision::RedirectToLogin(login);
        }

        if path == login && self.tokens.validate_at(token, now_millis) {
            return GateDecision::RedirectToDashboard(dashboard);
        }

        GateDecision::Allow
    }
}

/// `/p/{admin_path}`
pub fn dashboard_path(admin_path: &str) -> String {
    format!("/p/{}", admin_path)
}

/// `/p/{admin_path}/login`
pub fn login_path(admin_path: &str) -> String {
    format!("/p/{}/login", admin_path)
}
