//! Login gate.
//!
//! Every path except the login page, the health probe, and the configured
//! public asset prefixes needs a valid session token, taken from the
//! session cookie or an `Authorization: Bearer` header. Requests without
//! one are redirected to the login page.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use dropand_core::config::AppConfig;
use dropand_service::context::RequestContext;

use crate::state::AppState;

/// Path of the unauthenticated health probe.
pub const HEALTH_PATH: &str = "/api/health";

/// Path that ends a session.
pub const LOGOUT_PATH: &str = "/logout";

/// Reject unauthenticated requests by redirecting to the login page.
pub async fn require_login(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if is_public(&state.config, &path) {
        return next.run(request).await;
    }

    let token = session_token(&request, &state.config.auth.cookie_name);
    match token.map(|t| state.authenticator.authenticate(&t)) {
        Some(Ok(claims)) => {
            let ctx = RequestContext::new(claims.sub, claims.role);
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Some(Err(e)) => {
            debug!(path = %path, error = %e, "Rejected session token");
            Redirect::to(&state.config.auth.login_path).into_response()
        }
        None => Redirect::to(&state.config.auth.login_path).into_response(),
    }
}

/// Whether `path` is reachable without logging in.
pub fn is_public(config: &AppConfig, path: &str) -> bool {
    path == config.auth.login_path
        || path == HEALTH_PATH
        || path == LOGOUT_PATH
        || config
            .static_files
            .public_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
}

fn session_token(request: &Request, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(request.headers());
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        let config = AppConfig::default();
        assert!(is_public(&config, "/login"));
        assert!(is_public(&config, "/api/health"));
        assert!(is_public(&config, "/html5/css_html5/site.css"));
        assert!(is_public(&config, "/html5/js_html5/app.js"));
        assert!(!is_public(&config, "/html5/index.html"));
        assert!(!is_public(&config, "/api/directories"));
        assert!(!is_public(&config, "/"));
    }
}
