//! Book management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDraft, BookEdits, BookStatus, NewBook},
        category::Category,
    },
    repository::{BookStore, BorrowStore, CategoryStore, Repository, UserStore},
};

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    users: Arc<dyn UserStore>,
    categories: Arc<dyn CategoryStore>,
    borrows: Arc<dyn BorrowStore>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookStore>,
        users: Arc<dyn UserStore>,
        categories: Arc<dyn CategoryStore>,
        borrows: Arc<dyn BorrowStore>,
    ) -> Self {
        Self {
            books,
            users,
            categories,
            borrows,
        }
    }

    /// Service backed by the PostgreSQL repositories
    pub fn from_repository(repository: &Repository) -> Self {
        Self::new(
            Arc::new(repository.books.clone()),
            Arc::new(repository.users.clone()),
            Arc::new(repository.categories.clone()),
            Arc::new(repository.borrows.clone()),
        )
    }

    /// List books for the caller.
    /// `FREE` returns the books the caller can borrow, anything else the caller's own books.
    pub async fn list_books(&self, caller_id: i32, status: Option<BookStatus>) -> AppResult<Vec<Book>> {
        match status {
            Some(BookStatus::Free) => self.books.find_free_not_owned_by(caller_id).await,
            _ => self.books.find_by_owner(caller_id).await,
        }
    }

    /// Create a book owned by the caller
    pub async fn add_book(&self, caller_id: i32, draft: BookDraft) -> AppResult<Book> {
        let category = self.require_category(draft.category_id).await?;

        let owner = self
            .users
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| AppError::Validation("user required/invalid".to_string()))?;

        let book = self
            .books
            .insert(&NewBook {
                title: draft.title,
                status: BookStatus::Free,
                deleted: false,
                user_id: owner.id,
                category_id: category.id,
            })
            .await?;

        tracing::info!("Book {} created by user {}", book.id, owner.id);
        Ok(book)
    }

    /// Soft delete a book, refused while one of its borrows is still open
    pub async fn delete_book(&self, book_id: i32) -> AppResult<()> {
        let mut book = self.find_book(book_id).await?;

        let borrows = self.borrows.find_by_book_id(book.id).await?;
        if let Some(open) = borrows.iter().find(|b| b.is_open()) {
            let borrower = self
                .users
                .find_by_id(open.borrower_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "Borrow {} references unknown user {}",
                        open.id, open.borrower_id
                    ))
                })?;

            tracing::warn!(
                "Refusing to delete book {}: borrow {} still open for user {}",
                book.id,
                open.id,
                borrower.id
            );
            return Err(AppError::BookBorrowed {
                book_id: book.id,
                borrower,
            });
        }

        book.deleted = true;
        self.books.save(&book).await?;

        tracing::info!("Book {} soft deleted", book.id);
        Ok(())
    }

    /// Replace title and category of a book
    pub async fn update_book(&self, book_id: i32, edits: BookEdits) -> AppResult<Book> {
        let mut book = self.find_book(book_id).await?;
        let category = self.require_category(edits.category_id).await?;

        book.title = edits.title;
        book.category_id = category.id;
        let book = self.books.save(&book).await?;

        tracing::info!("Book {} updated", book.id);
        Ok(book)
    }

    /// Get a book by ID. Soft-deleted books are returned as well.
    pub async fn load_book(&self, book_id: i32) -> AppResult<Book> {
        self.find_book(book_id).await
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.find_all().await
    }

    async fn find_book(&self, book_id: i32) -> AppResult<Book> {
        self.books
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
    }

    async fn require_category(&self, category_id: Option<i32>) -> AppResult<Category> {
        let missing = || AppError::Validation("category required/invalid".to_string());
        let category_id = category_id.ok_or_else(missing)?;
        self.categories.find_by_id(category_id).await?.ok_or_else(missing)
    }
}
