//! Form login, logout, and the landing redirect.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::request::{LoginForm, LoginPageQuery};
use crate::state::AppState;

/// GET {login_path}
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginPageQuery>,
) -> Html<String> {
    let notice = if query.error.is_some() {
        r#"<p class="notice error">Invalid username or password.</p>"#
    } else if query.logout.is_some() {
        r#"<p class="notice">You have been logged out.</p>"#
    } else {
        ""
    };

    Html(render_login_page(&state.config.auth.login_path, notice))
}

/// POST {login_path}
///
/// Sets the session cookie and lands on the front end, or returns to the
/// login page with `?error=true`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, Redirect) {
    let auth = &state.config.auth;
    let failure = Redirect::to(&format!("{}?error=true", auth.login_path));

    if let Err(e) = form.validate() {
        warn!(error = %e, "Login form rejected");
        return (jar, failure);
    }

    match state.authenticator.login(&form.username, &form.password) {
        Ok(outcome) => {
            let cookie = Cookie::build((auth.cookie_name.clone(), outcome.token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            (jar.add(cookie), Redirect::to(&auth.default_success_url))
        }
        Err(_) => (jar, failure),
    }
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let auth = &state.config.auth;
    if jar.get(&auth.cookie_name).is_some() {
        info!("User logged out");
    }

    let removal = Cookie::build(auth.cookie_name.clone()).path("/");
    (
        jar.remove(removal),
        Redirect::to(&format!("{}?logout=true", auth.login_path)),
    )
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.config.auth.default_success_url)
}

fn render_login_page(action: &str, notice: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>DropAnd - Sign in</title>
</head>
<body>
  <h1>Sign in</h1>
  {notice}
  <form method="post" action="{action}">
    <label>Username <input type="text" name="username" autofocus></label>
    <label>Password <input type="password" name="password"></label>
    <button type="submit">Sign in</button>
  </form>
</body>
</html>
"#
    )
}
