//! Loan (checkout) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Open loan from database. The row exists while the book is checked out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub book_id: i64,
    pub student_id: i64,
    /// Employee who issued the loan
    pub employee_id: Option<i64>,
    pub loan_date: NaiveDate,
}

/// Issue or return request: which book, which student
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct LoanRequest {
    pub student_id: i64,
    pub book_id: i64,
}

/// Report request, both bounds inclusive
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct ReportRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One line of the loan report
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReportEntry {
    pub book_id: i64,
    pub book_title: String,
    pub student_id: i64,
    pub student_name: String,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub loan_date: NaiveDate,
    /// Set when the loan has been closed and moved to the archive
    pub returned_date: Option<NaiveDate>,
}

impl ReportEntry {
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }
}
