//! HTTP handlers: HTML pages of the loan desk plus a small JSON API

pub mod auth;
pub mod books;
pub mod flash;
pub mod health;
pub mod home;
pub mod loans;
pub mod openapi;
pub mod users;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::SessionClaims, AppState};

/// Name of the cookie holding the signed session token
pub const SESSION_COOKIE: &str = "session";

fn session_from_parts(parts: &Parts, state: &AppState) -> Option<SessionClaims> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.services.users.session_from_token(cookie.value()))
}

/// Identity of the caller, if signed in
pub struct CurrentUser(pub Option<SessionClaims>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(session_from_parts(parts, state)))
    }
}

/// Signed-in employee; anyone else is sent to the login form
pub struct EmployeeSession(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for EmployeeSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = session_from_parts(parts, state).ok_or(AppError::AuthRequired)?;
        claims.require_employee()?;
        Ok(EmployeeSession(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for the JSON API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", get(books::list_books_json))
        .route("/books/:id", get(books::get_book_json))
        .route("/users", get(users::list_users_json))
        .route("/students/:id/loans", get(loans::student_loans_json))
        .layer(cors);

    let pages = Router::new()
        .route("/", get(home::index))
        .route("/books/add", get(books::add_book_form).post(books::add_book))
        .route("/students/add", get(users::add_student_form).post(users::add_student))
        .route("/employees/add", get(users::add_employee_form).post(users::add_employee))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/loan", get(loans::loan_form).post(loans::issue_loan))
        .route("/return", get(loans::return_form).post(loans::return_loan))
        .route("/report", get(loans::report_form).post(loans::report))
        .route("/users", get(users::list_users))
        .route("/lista_livros", get(books::list_books));

    Router::new()
        .merge(pages)
        .nest("/api/v1", api_v1)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
