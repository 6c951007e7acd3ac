//! Data models for Bookshare

pub mod book;
pub mod borrow;
pub mod category;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookEdits, BookQuery, BookStatus, NewBook};
pub use borrow::Borrow;
pub use category::Category;
pub use user::{User, UserClaims};
