//! Loan management service

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::loan::{Loan, LoanRequest, ReportEntry, ReportRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig) -> Self {
        Self { repository, config }
    }

    /// Book ids currently on loan to a student
    pub async fn open_loans_for(&self, student_id: i64) -> AppResult<BTreeSet<i64>> {
        // Verify student exists
        self.repository.users.get_student(student_id).await?;
        self.repository.loans.open_loans_for(student_id).await
    }

    /// Lend a book to a student on behalf of an employee, dated today
    pub async fn issue_loan(&self, employee_id: i64, request: LoanRequest) -> AppResult<Loan> {
        self.issue_loan_on(employee_id, request, today()).await
    }

    /// Lend a book with an explicit loan date
    pub async fn issue_loan_on(
        &self,
        employee_id: i64,
        request: LoanRequest,
        loan_date: NaiveDate,
    ) -> AppResult<Loan> {
        let loan = self
            .repository
            .loans
            .issue(
                request.book_id,
                request.student_id,
                employee_id,
                loan_date,
                self.config.max_open_loans,
            )
            .await?;

        tracing::info!(
            "Employee {} lent book {} to student {}",
            employee_id,
            loan.book_id,
            loan.student_id
        );
        Ok(loan)
    }

    /// Take a book back from a student
    pub async fn return_loan(&self, employee_id: i64, request: LoanRequest) -> AppResult<Loan> {
        let loan = self
            .repository
            .loans
            .return_loan(request.book_id, request.student_id, today())
            .await?;

        tracing::info!(
            "Employee {} took back book {} from student {} (lent {})",
            employee_id,
            loan.book_id,
            loan.student_id,
            loan.loan_date
        );
        Ok(loan)
    }

    /// Loans issued within the requested range, both bounds inclusive
    pub async fn report(&self, request: ReportRequest) -> AppResult<Vec<ReportEntry>> {
        if request.start_date > request.end_date {
            return Err(AppError::Validation(format!(
                "Start date {} is after end date {}",
                request.start_date, request.end_date
            )));
        }
        self.repository
            .loans
            .report(request.start_date, request.end_date)
            .await
    }

    /// Count open loans
    pub async fn count_open(&self) -> AppResult<i64> {
        self.repository.loans.count_open().await
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
