//! Login and logout

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{error::AppResult, models::user::LoginRequest, views, AppState};

use super::{flash, SESSION_COOKIE};

pub async fn login_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, message) = flash::take(jar);
    (jar, Html(views::login_form(message)))
}

/// Check credentials and open a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> AppResult<(CookieJar, Redirect)> {
    let (token, _claims) = state
        .services
        .users
        .authenticate(&request.username, &request.password)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.config.auth.secure_cookies)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Redirect::to("/")))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(Cookie::build(SESSION_COOKIE).path("/")), Redirect::to("/"))
}
