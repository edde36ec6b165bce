//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Loan Desk API",
        version = "0.1.0",
        description = "Read-only JSON view of the school library loan desk"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books_json,
        books::get_book_json,
        // Users
        users::list_users_json,
        // Loans
        loans::student_loans_json,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::user::Student,
            crate::models::user::Employee,
            crate::models::user::UsersListing,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "users", description = "Students and employees"),
        (name = "loans", description = "Open loans")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_json_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/ready", "/books", "/books/{id}", "/users", "/students/{id}/loans"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
