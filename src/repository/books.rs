//! Books repository operations.
//!
//! Every method takes the store lock once, so a lookup followed by a
//! mutation cannot interleave with another request.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, BookPayload, BookShort},
};

use super::Repository;

impl Repository {
    /// Append a book and confirm it is retrievable by its id
    pub async fn books_create(&self, book: Book) -> AppResult<String> {
        let id = book.id.clone();
        let mut store = self.store.write().await;
        store.append(book);

        if store.find_by_id(&id).is_none() {
            return Err(AppError::Internal(format!(
                "book {} missing from store right after insertion",
                id
            )));
        }
        Ok(id)
    }

    /// Books matching `filter`, in insertion order
    pub async fn books_list(&self, filter: &BookFilter) -> Vec<BookShort> {
        let store = self.store.read().await;
        store
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookShort::from)
            .collect()
    }

    pub async fn books_get_by_id(&self, id: &str) -> Option<Book> {
        self.store.read().await.find_by_id(id).cloned()
    }

    /// Overwrite the book `id` with `payload`, returning the stored record
    pub async fn books_update(
        &self,
        id: &str,
        payload: BookPayload,
        now: DateTime<Utc>,
    ) -> Option<Book> {
        let mut store = self.store.write().await;
        let index = store.index_of(id)?;
        let mut book = store.find_by_id(id)?.clone();
        book.apply(payload, now);
        store.replace_at(index, book.clone())?;
        Some(book)
    }

    pub async fn books_delete(&self, id: &str) -> Option<Book> {
        let mut store = self.store.write().await;
        let index = store.index_of(id)?;
        store.remove_at(index)
    }

    pub async fn books_count(&self) -> usize {
        self.store.read().await.count()
    }
}
