//! Books repository for database operations.

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery},
};

const BOOK_COLUMNS: &str = "id, title, author, isbn, created_at, updated_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// Get a book by its numeric ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Point existence check on the ISBN column, used by unique issuance
    pub async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<bool, _>(0))
    }

    /// List books with pagination and sorting; returns the page and the total count
    pub async fn list(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        // Sort column comes from the SortBy whitelist, never from raw input
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY {} {} LIMIT $1 OFFSET $2",
            query.sort_by().as_column(),
            query.sort_dir().as_sql(),
        );

        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(query.per_page())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?
            .get::<i64, _>(0);

        Ok((books, total))
    }

    /// Case-insensitive substring search in title
    pub async fn search_title(&self, term: &str, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.search_where("title ILIKE '%' || $1 || '%'", term, query)
            .await
    }

    /// Case-insensitive substring search in author
    pub async fn search_author(&self, term: &str, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.search_where("author ILIKE '%' || $1 || '%'", term, query)
            .await
    }

    /// Case-insensitive substring search over both title and author
    pub async fn search_any(&self, term: &str, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.search_where(
            "(title ILIKE '%' || $1 || '%' OR author ILIKE '%' || $1 || '%')",
            term,
            query,
        )
        .await
    }

    async fn search_where(
        &self,
        predicate: &str,
        term: &str,
        query: &BookQuery,
    ) -> AppResult<(Vec<Book>, i64)> {
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE {predicate} ORDER BY {} {} LIMIT $2 OFFSET $3",
            query.sort_by().as_column(),
            query.sort_dir().as_sql(),
        );

        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(term)
            .bind(query.per_page())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query(&format!("SELECT COUNT(*) FROM books WHERE {predicate}"))
            .bind(term)
            .fetch_one(&self.pool)
            .await?
            .get::<i64, _>(0);

        Ok((books, total))
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a new book. The UNIQUE index on isbn is the final uniqueness
    /// backstop; callers handle the unique-violation case.
    pub async fn create(&self, title: &str, author: &str, isbn: &str) -> AppResult<Book> {
        Ok(sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, author, isbn) VALUES ($1, $2, $3) RETURNING {BOOK_COLUMNS}"
        ))
        .bind(title)
        .bind(author)
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?)
    }

    pub async fn update(&self, id: i64, title: &str, author: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET title = $2, author = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {BOOK_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(author)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }
}
