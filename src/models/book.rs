//! Book catalog entry model and request/query types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A catalog record. The ISBN is generated at creation time and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// ISBN-13 with the 978 prefix, unique across the catalog
    pub isbn: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a book. The ISBN is never client-supplied.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 50, message = "Author must be between 1 and 50 characters"))]
    pub author: String,
}

/// Payload for updating a book. Only title and author are mutable.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 50, message = "Author must be between 1 and 50 characters"))]
    pub author: String,
}

/// Sortable columns, whitelisted so query params never reach SQL directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Id,
    Title,
    Author,
    CreatedAt,
}

impl SortBy {
    pub fn as_column(self) -> &'static str {
        match self {
            SortBy::Id => "id",
            SortBy::Title => "title",
            SortBy::Author => "author",
            SortBy::CreatedAt => "created_at",
        }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

impl Default for SortDir {
    fn default() -> Self {
        SortDir::Asc
    }
}

/// Listing, search and pagination parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Free search over title and author
    pub q: Option<String>,
    /// Search in title only
    pub title: Option<String>,
    /// Search by author only
    pub author: Option<String>,
    /// Page number, 1-based (default: 1)
    pub page: Option<i64>,
    /// Items per page (default: 20)
    pub per_page: Option<i64>,
    /// Sort column (default: id)
    pub sort_by: Option<SortBy>,
    /// Sort direction (default: asc)
    pub sort_dir: Option<SortDir>,
}

impl BookQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by.unwrap_or_default()
    }

    pub fn sort_dir(&self) -> SortDir {
        self.sort_dir.unwrap_or_default()
    }
}
