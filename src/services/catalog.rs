//! Catalog management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book; all copies start available
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!(
            "Added book {} {:?} ({} copies)",
            created.id,
            created.title,
            created.total_quantity
        );
        Ok(created)
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Books that can be lent right now
    pub async fn list_available(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_available().await
    }

    /// Books with copies out, i.e. candidates for a return
    pub async fn list_on_loan(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_on_loan().await
    }
}
