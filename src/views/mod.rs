//! HTML pages of the loan desk

use std::fmt::Write;

use crate::{
    api::flash::Flash,
    models::{Book, ReportEntry, ReportRequest, Role, SessionClaims, Student, UsersListing},
};

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Loan Desk</title>
</head>
<body>
<nav>
<a href="/">Home</a> |
<a href="/lista_livros">Books</a> |
<a href="/users">Users</a> |
<a href="/loan">Loan</a> |
<a href="/return">Return</a> |
<a href="/report">Report</a>
</nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn flash_block(flash: Option<Flash>) -> String {
    match flash {
        Some(flash) => format!(
            r#"<p class="{}">{}</p>"#,
            if flash.is_error() { "error" } else { "success" },
            escape(flash.message())
        ),
        None => String::new(),
    }
}

/// Plain message, used for errors surfaced to the user
pub fn message_page(message: &str) -> String {
    layout(
        "Notice",
        &format!(r#"<p>{}</p><p><a href="javascript:history.back()">Back</a></p>"#, escape(message)),
    )
}

pub fn index(user: Option<&SessionClaims>, open_loans: i64) -> String {
    let who = match user {
        Some(claims) => format!(
            r#"<p>Signed in as <strong>{}</strong> ({}). <a href="/logout">Log out</a></p>"#,
            escape(&claims.sub),
            claims.role
        ),
        None => r#"<p><a href="/login">Log in</a></p>"#.to_string(),
    };
    let body = format!(
        r#"{who}
<p>Books currently on loan: {open_loans}</p>
<ul>
<li><a href="/books/add">Add a book</a></li>
<li><a href="/students/add">Register a student</a></li>
<li><a href="/employees/add">Register an employee</a></li>
</ul>"#
    );
    layout("Loan Desk", &body)
}

pub fn book_form() -> String {
    layout(
        "Add a book",
        r#"<form method="post" action="/books/add">
<label>Title <input name="title" required></label><br>
<label>Publisher <input name="publisher" required></label><br>
<label>Year <input name="year" type="number" required></label><br>
<label>Copies <input name="total_quantity" type="number" min="0" required></label><br>
<button type="submit">Add</button>
</form>"#,
    )
}

/// Registration form for either identity space
pub fn identity_form(role: Role) -> String {
    let (title, action) = match role {
        Role::Student => ("Register a student", "/students/add"),
        Role::Employee => ("Register an employee", "/employees/add"),
    };
    layout(
        title,
        &format!(
            r#"<form method="post" action="{action}">
<label>Name <input name="name" required></label><br>
<label>Password <input name="password" type="password" required></label><br>
<button type="submit">Register</button>
</form>"#
        ),
    )
}

pub fn login_form(flash: Option<Flash>) -> String {
    layout(
        "Log in",
        &format!(
            r#"{}
<form method="post" action="/login">
<label>Name <input name="username" required></label><br>
<label>Password <input name="password" type="password" required></label><br>
<button type="submit">Log in</button>
</form>"#,
            flash_block(flash)
        ),
    )
}

fn student_options(students: &[Student]) -> String {
    let mut out = String::new();
    for student in students {
        let _ = write!(
            out,
            r#"<option value="{}">{} (#{})</option>"#,
            student.id,
            escape(&student.name),
            student.id
        );
    }
    out
}

fn book_options(books: &[Book]) -> String {
    let mut out = String::new();
    for book in books {
        let _ = write!(
            out,
            r#"<option value="{}">{} ({} of {} available)</option>"#,
            book.id,
            escape(&book.title),
            book.available_quantity,
            book.total_quantity
        );
    }
    out
}

fn loan_desk_form(title: &str, action: &str, students: &[Student], books: &[Book], flash: Option<Flash>) -> String {
    layout(
        title,
        &format!(
            r#"{flash}
<form method="post" action="{action}">
<label>Student <select name="student_id">{students}</select></label><br>
<label>Book <select name="book_id">{books}</select></label><br>
<button type="submit">{title}</button>
</form>"#,
            flash = flash_block(flash),
            action = action,
            students = student_options(students),
            books = book_options(books),
            title = escape(title),
        ),
    )
}

/// Issue form: every student, books with a free copy
pub fn loan_form(students: &[Student], books: &[Book], flash: Option<Flash>) -> String {
    loan_desk_form("Lend a book", "/loan", students, books, flash)
}

/// Return form: every student, books with copies out
pub fn return_form(students: &[Student], books: &[Book], flash: Option<Flash>) -> String {
    loan_desk_form("Return a book", "/return", students, books, flash)
}

pub fn report_form() -> String {
    layout(
        "Loan report",
        r#"<form method="post" action="/report">
<label>From <input name="start_date" type="date" required></label><br>
<label>To <input name="end_date" type="date" required></label><br>
<button type="submit">Show</button>
</form>"#,
    )
}

pub fn report(request: &ReportRequest, entries: &[ReportEntry]) -> String {
    let mut rows = String::new();
    for entry in entries {
        let returned = match entry.returned_date {
            Some(date) if !entry.is_open() => date.to_string(),
            _ => "on loan".to_string(),
        };
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.loan_date,
            escape(&entry.book_title),
            escape(&entry.student_name),
            escape(entry.employee_name.as_deref().unwrap_or("-")),
            returned,
        );
    }
    layout(
        "Loan report",
        &format!(
            r#"<p>Loans from {} to {}: {}</p>
<table>
<tr><th>Date</th><th>Book</th><th>Student</th><th>Lent by</th><th>Returned</th></tr>
{}
</table>"#,
            request.start_date,
            request.end_date,
            entries.len(),
            rows
        ),
    )
}

pub fn users_table(listing: &UsersListing) -> String {
    let mut body = String::from("<h2>Students</h2>\n<table>\n<tr><th>Id</th><th>Name</th></tr>\n");
    for student in &listing.students {
        let _ = writeln!(body, "<tr><td>{}</td><td>{}</td></tr>", student.id, escape(&student.name));
    }
    body.push_str("</table>\n<h2>Employees</h2>\n<table>\n<tr><th>Id</th><th>Name</th></tr>\n");
    for employee in &listing.employees {
        let _ = writeln!(body, "<tr><td>{}</td><td>{}</td></tr>", employee.id, escape(&employee.name));
    }
    body.push_str("</table>");
    layout("Users", &body)
}

pub fn books_table(books: &[Book]) -> String {
    let mut body = String::from(
        "<table>\n<tr><th>Id</th><th>Title</th><th>Publisher</th><th>Year</th><th>Total</th><th>Available</th><th>On loan</th></tr>\n",
    );
    for book in books {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            book.id,
            escape(&book.title),
            escape(&book.publisher),
            book.year,
            book.total_quantity,
            book.available_quantity,
            book.copies_on_loan()
        );
    }
    body.push_str("</table>");
    layout("Books", &body)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn books_table_escapes_titles() {
        let books = vec![Book {
            id: 1,
            title: "<script>".to_string(),
            publisher: "P".to_string(),
            year: 2000,
            total_quantity: 1,
            available_quantity: 1,
        }];
        let html = books_table(&books);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn books_table_counts_copies_on_loan() {
        let books = vec![Book {
            id: 7,
            title: "Iracema".to_string(),
            publisher: "P".to_string(),
            year: 1865,
            total_quantity: 3,
            available_quantity: 1,
        }];
        let html = books_table(&books);
        assert!(html.contains("<td>3</td><td>1</td><td>2</td></tr>"));
    }

    #[test]
    fn report_marks_open_loans() {
        let request = ReportRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        };
        let entry = |returned_date: Option<NaiveDate>| ReportEntry {
            book_id: 1,
            book_title: "Iracema".to_string(),
            student_id: 1,
            student_name: "ana".to_string(),
            employee_id: None,
            employee_name: None,
            loan_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            returned_date,
        };
        let html = report(
            &request,
            &[entry(None), entry(NaiveDate::from_ymd_opt(2026, 1, 9))],
        );
        assert!(html.contains("<td>on loan</td>"));
        assert!(html.contains("<td>2026-01-09</td>"));
        assert!(html.contains("Loans from 2026-01-01 to 2026-01-31: 2"));
    }

    #[test]
    fn login_form_shows_flash() {
        let html = login_form(Some(Flash::InvalidCredentials));
        assert!(html.contains("Invalid name or password."));
        assert!(html.contains(r#"class="error""#));
    }
}
