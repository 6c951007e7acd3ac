//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookStatus, NewBook},
};

/// Persistence for books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Get a book by ID, soft-deleted ones included
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;
    /// Non-deleted FREE books owned by someone else than `user_id`
    async fn find_free_not_owned_by(&self, user_id: i32) -> AppResult<Vec<Book>>;
    /// Non-deleted books owned by `user_id`
    async fn find_by_owner(&self, user_id: i32) -> AppResult<Vec<Book>>;
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;
    /// Write back every mutable column of `book`
    async fn save(&self, book: &Book) -> AppResult<Book>;
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_free_not_owned_by(&self, user_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE status = $1 AND user_id != $2 AND deleted = FALSE
            ORDER BY title
            "#,
        )
        .bind(BookStatus::Free)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn find_by_owner(&self, user_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE user_id = $1 AND deleted = FALSE ORDER BY title",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, status, deleted, user_id, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(book.status)
        .bind(book.deleted)
        .bind(book.user_id)
        .bind(book.category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, book: &Book) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, status = $3, deleted = $4, user_id = $5, category_id = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.status)
        .bind(book.deleted)
        .bind(book.user_id)
        .bind(book.category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
