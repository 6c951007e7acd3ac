//! Borrows repository (read only)

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::borrow::Borrow};

/// Read access to borrow records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowStore: Send + Sync {
    /// Every borrow of a book, returned or not
    async fn find_by_book_id(&self, book_id: i32) -> AppResult<Vec<Borrow>>;
}

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowStore for BorrowsRepository {
    async fn find_by_book_id(&self, book_id: i32) -> AppResult<Vec<Borrow>> {
        let borrows = sqlx::query_as::<_, Borrow>(
            r#"
            SELECT id, book_id, borrower_id, open_date, close_date
            FROM borrows
            WHERE book_id = $1
            ORDER BY open_date
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(borrows)
    }
}
