//! Ordered in-memory book store.
//!
//! Insertion order is preserved and is the iteration order. The store is not
//! synchronized; [`super::Repository`] wraps it in a lock.

use crate::models::Book;

#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    /// Remove the book at `index`, `None` when out of bounds
    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        (index < self.books.len()).then(|| self.books.remove(index))
    }

    /// Replace the book at `index`, returning the previous record
    pub fn replace_at(&mut self, index: usize, book: Book) -> Option<Book> {
        self.books
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, book))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Number of stored books
    pub fn count(&self) -> usize {
        self.books.len()
    }
}
