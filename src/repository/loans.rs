//! Loans repository for database operations

use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, ReportEntry},
};

use super::conflict_on_duplicate;

#[derive(Clone)]
pub struct LoansRepository {
    pool: SqlitePool,
}

async fn student_exists<'e, E>(executor: E, student_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = ?)")
        .bind(student_id)
        .fetch_one(executor)
        .await
}

/// Book ids of the open loans held by a student
async fn open_book_ids<'e, E>(executor: E, student_id: i64) -> Result<BTreeSet<i64>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let ids: Vec<i64> = sqlx::query_scalar("SELECT book_id FROM loans WHERE student_id = ?")
        .bind(student_id)
        .fetch_all(executor)
        .await?;
    Ok(ids.into_iter().collect())
}

impl LoansRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Books currently checked out to a student
    pub async fn open_loans_for(&self, student_id: i64) -> AppResult<BTreeSet<i64>> {
        Ok(open_book_ids(&self.pool, student_id).await?)
    }

    /// Issue a loan.
    ///
    /// The stock decrement is the first statement of the transaction so the
    /// write lock is taken before anything is read; the remaining checks
    /// (student exists, student under `max_open_loans`, pair not already
    /// lent) roll the decrement back when they fail.
    pub async fn issue(
        &self,
        book_id: i64,
        student_id: i64,
        employee_id: i64,
        loan_date: NaiveDate,
        max_open_loans: i64,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            "UPDATE books SET available_quantity = available_quantity - 1 WHERE id = ? AND available_quantity > 0",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if !student_exists(&mut *tx, student_id).await? {
            return Err(AppError::NotFound(format!("Student with id {} not found", student_id)));
        }
        if decremented == 0 {
            return Err(AppError::Unavailable(format!("Book {} not found or unavailable", book_id)));
        }

        let held = open_book_ids(&mut *tx, student_id).await?;
        if held.len() as i64 >= max_open_loans {
            return Err(AppError::LimitExceeded(format!(
                "Student already holds {} books (maximum {})",
                held.len(),
                max_open_loans
            )));
        }
        if held.contains(&book_id) {
            return Err(AppError::Conflict(format!(
                "Book {} is already on loan to student {}",
                book_id, student_id
            )));
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, student_id, employee_id, loan_date)
            SELECT ?, ?, ?, ?
            WHERE (SELECT COUNT(*) FROM loans WHERE student_id = ?) < ?
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(student_id)
        .bind(employee_id)
        .bind(loan_date)
        .bind(student_id)
        .bind(max_open_loans)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Book is already on loan to this student"))?
        .ok_or_else(|| {
            AppError::LimitExceeded(format!("Student already holds {} books", max_open_loans))
        })?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Close a loan: archive it, delete the open row and put the copy back on the shelf
    pub async fn return_loan(
        &self,
        book_id: i64,
        student_id: i64,
        returned_date: NaiveDate,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        // Write first, then explain a miss
        let loan = sqlx::query_as::<_, Loan>(
            "DELETE FROM loans WHERE book_id = ? AND student_id = ? RETURNING *",
        )
        .bind(book_id)
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(loan) = loan else {
            if !student_exists(&mut *tx, student_id).await? {
                return Err(AppError::NotFound(format!("Student with id {} not found", student_id)));
            }
            return Err(AppError::NotFound(format!(
                "Book {} is not on loan to student {}",
                book_id, student_id
            )));
        };

        sqlx::query(
            r#"
            INSERT INTO loans_archives (book_id, student_id, employee_id, loan_date, returned_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(loan.book_id)
        .bind(loan.student_id)
        .bind(loan.employee_id)
        .bind(loan.loan_date)
        .bind(returned_date)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE books SET available_quantity = available_quantity + 1 WHERE id = ? AND available_quantity < total_quantity",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Loans issued between two dates (inclusive), open and archived
    pub async fn report(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<ReportEntry>> {
        let entries = sqlx::query_as::<_, ReportEntry>(
            r#"
            SELECT l.book_id, b.title AS book_title, l.student_id, s.name AS student_name,
                   l.employee_id, e.name AS employee_name, l.loan_date, NULL AS returned_date
            FROM loans l
            JOIN books b ON b.id = l.book_id
            JOIN students s ON s.id = l.student_id
            LEFT JOIN employees e ON e.id = l.employee_id
            WHERE l.loan_date BETWEEN ? AND ?
            UNION ALL
            SELECT a.book_id, b.title AS book_title, a.student_id, s.name AS student_name,
                   a.employee_id, e.name AS employee_name, a.loan_date, a.returned_date
            FROM loans_archives a
            JOIN books b ON b.id = a.book_id
            JOIN students s ON s.id = a.student_id
            LEFT JOIN employees e ON e.id = a.employee_id
            WHERE a.loan_date BETWEEN ? AND ?
            ORDER BY loan_date, book_id
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Count open loans
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
