//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    error::AppResult,
    models::{
        book::{BookCreated, BookData, BookList, BookPayload, BookQuery},
        envelope::{Envelope, ResponseStatus},
    },
    AppState,
};

use super::{JsonBody, QueryParams};

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added, `data.bookId` holds its id", body = EnvelopeDoc),
        (status = 400, description = "Missing name or readPage above pageCount", body = EnvelopeDoc),
        (status = 500, description = "Book could not be stored", body = EnvelopeDoc)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<Envelope<BookCreated>> {
    let book_id = state.services.books.create_book(payload).await?;

    Ok(Envelope::ok(BookCreated { book_id })
        .with_message("book added")
        .with_code(StatusCode::CREATED))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "`data.books` holds id, name and publisher of each match", body = EnvelopeDoc),
        (status = 404, description = "No filter could be applied", body = EnvelopeDoc)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BookQuery>,
) -> AppResult<Envelope<BookList>> {
    let books = state.services.books.list_books(&query).await?;
    Ok(Envelope::ok(BookList { books }))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "`data.book` holds the full record", body = EnvelopeDoc),
        (status = 404, description = "Book not found", body = EnvelopeDoc)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Envelope<BookData>> {
    let book = state.services.books.get_book(&book_id).await?;
    Ok(Envelope::ok(BookData { book }))
}

/// Update a book by id
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = EnvelopeDoc),
        (status = 400, description = "Missing name or readPage above pageCount", body = EnvelopeDoc),
        (status = 404, description = "Book not found", body = EnvelopeDoc)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<Envelope<()>> {
    state.services.books.update_book(&book_id, payload).await?;
    Ok(Envelope::message(ResponseStatus::Success, StatusCode::OK, "book updated"))
}

/// Delete a book by id
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = EnvelopeDoc),
        (status = 404, description = "Book not found", body = EnvelopeDoc)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Envelope<()>> {
    state.services.books.delete_book(&book_id).await?;
    Ok(Envelope::message(ResponseStatus::Success, StatusCode::OK, "book deleted"))
}
