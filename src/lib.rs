//! Book Loan Desk
//!
//! A small school-library server: registers books, students and employees,
//! authenticates users and records checkouts and returns, with a cap on the
//! number of books a student may hold at once.

use std::sync::Arc;

use sqlx::SqlitePool;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub pool: SqlitePool,
}

impl AppState {
    /// Wire repository and services over an already migrated pool
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        let repository = repository::Repository::new(pool.clone());
        let services = services::Services::new(repository, config.auth.clone(), config.loans.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            pool,
        }
    }
}
