//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub publisher: String,
    pub year: i32,
    /// Number of copies owned by the library
    pub total_quantity: i32,
    /// Copies not tied to an open loan (0 <= available <= total)
    pub available_quantity: i32,
}

impl Book {
    /// Number of copies currently out on loan
    pub fn copies_on_loan(&self) -> i32 {
        self.total_quantity - self.available_quantity
    }
}

/// Create book request (form fields of `/books/add`)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Publisher is required"))]
    pub publisher: String,
    pub year: i32,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub total_quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_on_loan_is_the_gap_between_quantities() {
        let book = Book {
            id: 1,
            title: "Dom Casmurro".to_string(),
            publisher: "Garnier".to_string(),
            year: 1899,
            total_quantity: 3,
            available_quantity: 1,
        };
        assert_eq!(book.copies_on_loan(), 2);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let book = CreateBook {
            title: "Iracema".to_string(),
            publisher: "Typ. Viana".to_string(),
            year: 1865,
            total_quantity: -1,
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn empty_title_is_rejected() {
        let book = CreateBook {
            title: String::new(),
            publisher: "Ática".to_string(),
            year: 1990,
            total_quantity: 2,
        };
        let errors = book.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
