//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    views, AppState,
};

pub async fn add_book_form() -> Html<String> {
    Html(views::book_form())
}

/// Create a book from the `/books/add` form
pub async fn add_book(
    State(state): State<AppState>,
    Form(book): Form<CreateBook>,
) -> AppResult<Redirect> {
    state.services.catalog.add_book(book).await?;
    Ok(Redirect::to("/"))
}

/// Every book with its stock
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Html(views::books_table(&books)))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books_json(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_json(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}
