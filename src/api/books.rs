//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDraft, BookEdits, BookQuery},
};

use super::{AppJson, AppPath, AppQuery, AuthenticatedUser};

/// Mutations report an unknown book as a bad request
fn unknown_book_is_bad_request(err: AppError) -> AppError {
    match err {
        AppError::NotFound(msg) => AppError::BadRequest(msg),
        other => other,
    }
}

/// List the caller's books, or the books available to borrow with `status=FREE`
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(caller_id): AuthenticatedUser,
    AppQuery(query): AppQuery<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_books(caller_id, query.status).await?;
    Ok(Json(books))
}

/// Create a new book owned by the caller
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookDraft,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing category or user, or invalid title"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(caller_id): AuthenticatedUser,
    AppJson(draft): AppJson<BookDraft>,
) -> AppResult<(StatusCode, Json<Book>)> {
    draft.validate()?;

    let created = state.services.books.add_book(caller_id, draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Soft delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Book not found"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Book is currently borrowed", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_caller_id): AuthenticatedUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .books
        .delete_book(id)
        .await
        .map_err(unknown_book_is_bad_request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update title and category of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookEdits,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Book not found or invalid category"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_caller_id): AuthenticatedUser,
    AppPath(id): AppPath<i32>,
    AppJson(edits): AppJson<BookEdits>,
) -> AppResult<Json<Book>> {
    edits.validate()?;

    let book = state
        .services
        .books
        .update_book(id, edits)
        .await
        .map_err(unknown_book_is_bad_request)?;
    Ok(Json(book))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.load_book(id).await?;
    Ok(Json(book))
}
