//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, isbn};
use crate::error::ErrorResponse;
use crate::models::book::{Book, CreateBookRequest, UpdateBookRequest};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "1.0.0",
        description = "Book Catalog Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::get_book,
        books::list_books,
        books::update_book,
        books::delete_book,
        books::search_books,
        books::search_books_by_title,
        books::search_books_by_author,
        // ISBN
        isbn::validate_isbn,
    ),
    components(
        schemas(
            health::HealthResponse,
            Book,
            CreateBookRequest,
            UpdateBookRequest,
            isbn::ValidateIsbnResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Book catalog CRUD and search"),
        (name = "isbn", description = "ISBN-13 validation")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
