//! One-shot messages carried across a redirect in a cookie

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "flash";

/// Messages a handler can leave for the next page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    LoanIssued,
    BookReturned,
    InvalidCredentials,
}

impl Flash {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flash::LoanIssued => "loan_issued",
            Flash::BookReturned => "book_returned",
            Flash::InvalidCredentials => "invalid_credentials",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "loan_issued" => Some(Flash::LoanIssued),
            "book_returned" => Some(Flash::BookReturned),
            "invalid_credentials" => Some(Flash::InvalidCredentials),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::LoanIssued => "Book lent successfully.",
            Flash::BookReturned => "Book returned successfully.",
            Flash::InvalidCredentials => "Invalid name or password.",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Flash::InvalidCredentials)
    }
}

/// Leave a message for the next rendered page
pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.as_str()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Read the pending message, if any, and clear it
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = match jar.get(FLASH_COOKIE) {
        Some(cookie) => Flash::parse(cookie.value()),
        None => return (jar, None),
    };
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}
