//! Data models for the book loan server

pub mod book;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook};
pub use loan::{Loan, LoanRequest, ReportEntry, ReportRequest};
pub use user::{CreateIdentity, Employee, Identity, LoginRequest, Role, SessionClaims, Student, UsersListing};
