//! Error types for the book loan server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;

use crate::{
    api::flash::{self, Flash},
    views,
};

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced student or book does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Book has no copy left to lend
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Student already holds the maximum number of books
    #[error("Loan limit exceeded: {0}")]
    LimitExceeded(String),

    /// No session, or a session without the employee role
    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status used when the error is rendered as a message page
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::LimitExceeded(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AuthRequired | AppError::InvalidCredentials => StatusCode::SEE_OTHER,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::AuthRequired => return Redirect::to("/login").into_response(),
            AppError::InvalidCredentials => {
                let jar = flash::set(CookieJar::new(), Flash::InvalidCredentials);
                return (jar, Redirect::to("/login")).into_response();
            }
            AppError::NotFound(msg)
            | AppError::Unavailable(msg)
            | AppError::LimitExceeded(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg) => msg,
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        (status, Html(views::message_page(&message))).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
