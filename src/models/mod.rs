//! Data models for Bookshelf

pub mod book;
pub mod envelope;

// Re-export commonly used types
pub use book::{Book, BookFilter, BookPayload, BookQuery, BookShort};
pub use envelope::{Envelope, ResponseStatus};
