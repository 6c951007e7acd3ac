//! Borrow (loan) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow record, owned by the lending subsystem and only read here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: i32,
    pub book_id: i32,
    pub borrower_id: i32,
    pub open_date: DateTime<Utc>,
    /// `None` while the loan is active
    pub close_date: Option<DateTime<Utc>>,
}

impl Borrow {
    /// An open borrow has not been returned yet
    pub fn is_open(&self) -> bool {
        self.close_date.is_none()
    }
}
