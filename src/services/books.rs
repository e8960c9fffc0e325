//! Bookshelf service: validation and book lifecycle

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{generate_book_id, PayloadViolation},
        Book, BookFilter, BookPayload, BookQuery, BookShort,
    },
    repository::Repository,
};

/// Operation a payload is validated for; selects the error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadAction {
    Create,
    Update,
}

fn violation_message(action: PayloadAction, violation: PayloadViolation) -> &'static str {
    match (action, violation) {
        (PayloadAction::Create, PayloadViolation::MissingName) => "name is required to add a book",
        (PayloadAction::Create, PayloadViolation::ReadPageExceedsPageCount) => {
            "readPage must not exceed pageCount"
        }
        (PayloadAction::Update, PayloadViolation::MissingName) => "update failed: name is required",
        (PayloadAction::Update, PayloadViolation::ReadPageExceedsPageCount) => {
            "update failed: readPage must not exceed pageCount"
        }
    }
}

fn check_payload(payload: &BookPayload, action: PayloadAction) -> AppResult<()> {
    payload
        .check()
        .map_err(|violation| AppError::Validation(violation_message(action, violation).to_string()))
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its id
    pub async fn create_book(&self, payload: BookPayload) -> AppResult<String> {
        check_payload(&payload, PayloadAction::Create)?;

        let book = Book::new(generate_book_id(), payload, Utc::now());
        let id = self
            .repository
            .books_create(book)
            .await
            .map_err(|e| {
                tracing::error!("Book insertion check failed: {}", e);
                AppError::Internal("failed to add book".to_string())
            })?;

        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    /// List books matching the query, projected to their short form
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<BookShort>> {
        let filter = BookFilter::from_query(query)
            .ok_or_else(|| AppError::NotFound("records not found".to_string()))?;

        let books = self.repository.books_list(&filter).await;
        tracing::debug!("Listed {} books with filter {:?}", books.len(), filter);
        Ok(books)
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await.ok_or_else(|| {
            tracing::debug!("Book not found: id={}", id);
            AppError::NotFound("book not found".to_string())
        })
    }

    /// Overwrite an existing book. `finished` keeps its value from creation.
    pub async fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<Book> {
        check_payload(&payload, PayloadAction::Update)?;

        let book = self
            .repository
            .books_update(id, payload, Utc::now())
            .await
            .ok_or_else(|| AppError::NotFound("update failed: id not found".to_string()))?;

        tracing::info!("Book updated: id={}", id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.repository
            .books_delete(id)
            .await
            .ok_or_else(|| AppError::NotFound("delete failed: id not found".to_string()))?;

        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Number of stored books
    pub async fn count(&self) -> usize {
        self.repository.books_count().await
    }
}
