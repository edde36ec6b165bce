//! Loan desk endpoints (employees only)

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppResult,
    models::loan::{LoanRequest, ReportRequest},
    views, AppState,
};

use super::{
    flash::{self, Flash},
    EmployeeSession,
};

/// Issue form: students and books with a free copy
pub async fn loan_form(
    State(state): State<AppState>,
    EmployeeSession(_claims): EmployeeSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let students = state.services.users.list_students().await?;
    let books = state.services.catalog.list_available().await?;
    let (jar, message) = flash::take(jar);
    Ok((jar, Html(views::loan_form(&students, &books, message))))
}

/// Lend a book on behalf of the signed-in employee
pub async fn issue_loan(
    State(state): State<AppState>,
    EmployeeSession(claims): EmployeeSession,
    jar: CookieJar,
    Form(request): Form<LoanRequest>,
) -> AppResult<(CookieJar, Redirect)> {
    state.services.loans.issue_loan(claims.user_id, request).await?;
    Ok((flash::set(jar, Flash::LoanIssued), Redirect::to("/loan")))
}

/// Return form: students and books with copies out
pub async fn return_form(
    State(state): State<AppState>,
    EmployeeSession(_claims): EmployeeSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let students = state.services.users.list_students().await?;
    let books = state.services.catalog.list_on_loan().await?;
    let (jar, message) = flash::take(jar);
    Ok((jar, Html(views::return_form(&students, &books, message))))
}

pub async fn return_loan(
    State(state): State<AppState>,
    EmployeeSession(claims): EmployeeSession,
    jar: CookieJar,
    Form(request): Form<LoanRequest>,
) -> AppResult<(CookieJar, Redirect)> {
    state.services.loans.return_loan(claims.user_id, request).await?;
    Ok((flash::set(jar, Flash::BookReturned), Redirect::to("/return")))
}

pub async fn report_form(EmployeeSession(_claims): EmployeeSession) -> Html<String> {
    Html(views::report_form())
}

/// Loans issued within a date range
pub async fn report(
    State(state): State<AppState>,
    EmployeeSession(_claims): EmployeeSession,
    Form(request): Form<ReportRequest>,
) -> AppResult<Html<String>> {
    let entries = state.services.loans.report(request).await?;
    Ok(Html(views::report(&request, &entries)))
}

/// Books currently on loan to a student
#[utoipa::path(
    get,
    path = "/students/{id}/loans",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Book ids of the student's open loans", body = Vec<i64>),
        (status = 303, description = "No employee session, redirected to /login"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn student_loans_json(
    State(state): State<AppState>,
    EmployeeSession(_claims): EmployeeSession,
    Path(student_id): Path<i64>,
) -> AppResult<Json<Vec<i64>>> {
    let books = state.services.loans.open_loans_for(student_id).await?;
    Ok(Json(books.into_iter().collect()))
}
