//! Book model and related request/response types.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

/// Length of generated book identifiers
pub const BOOK_ID_LEN: usize = 16;

const BOOK_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a random, URL-safe book identifier
pub fn generate_book_id() -> String {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LEN)
        .map(|_| BOOK_ID_ALPHABET[rng.gen_range(0..BOOK_ID_ALPHABET.len())] as char)
        .collect()
}

/// Full book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// Whether `readPage` equalled `pageCount` when the book was added
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated payload.
    ///
    /// `finished` is derived here and nowhere else.
    pub fn new(id: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let name = payload.name.unwrap_or_default();
        Self {
            id,
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: payload.page_count == payload.read_page,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every editable field from `payload`.
    ///
    /// `id`, `inserted_at` and `finished` keep their stored values.
    pub fn apply(&mut self, payload: BookPayload, now: DateTime<Utc>) {
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now;
    }

    /// Reading progress check used by the `finished` list filter
    pub fn is_read_through(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create/update book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_read_progress"))]
pub struct BookPayload {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

fn validate_read_progress(payload: &BookPayload) -> Result<(), ValidationError> {
    if payload.read_page > payload.page_count {
        return Err(ValidationError::new("read_page_exceeds_page_count"));
    }
    Ok(())
}

/// Reason a book payload was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadViolation {
    MissingName,
    ReadPageExceedsPageCount,
}

impl BookPayload {
    /// Validate the payload, reporting the first violated rule.
    ///
    /// The name rule is checked before the reading progress rule.
    pub fn check(&self) -> Result<(), PayloadViolation> {
        self.validate().map_err(|errors| first_violation(&errors))
    }
}

fn first_violation(errors: &ValidationErrors) -> PayloadViolation {
    if errors.field_errors().contains_key("name") {
        PayloadViolation::MissingName
    } else {
        PayloadViolation::ReadPageExceedsPageCount
    }
}

/// Raw list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive exact match on the book name
    pub name: Option<String>,
    /// `1` or `true` for books being read, anything else for the others
    pub reading: Option<String>,
    /// `1` or `true` for finished books, anything else for unfinished ones
    pub finished: Option<String>,
}

/// Parse a query flag into a tri-state: absent, true or false.
///
/// Empty values count as absent.
pub fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim() {
        "" => None,
        v => Some(v == "1" || v.eq_ignore_ascii_case("true")),
    }
}

/// Resolved list filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    Name(String),
    Reading(bool),
    Finished(bool),
}

impl BookFilter {
    /// Resolve the query into a single filter; the first present parameter wins
    /// in the order name, reading, finished.
    ///
    /// Returns `None` only if no branch applies, which cannot happen.
    pub fn from_query(query: &BookQuery) -> Option<Self> {
        let name = query
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| BookFilter::Name(n.to_lowercase()));
        let reading = parse_flag(query.reading.as_deref());
        let finished = parse_flag(query.finished.as_deref());

        name.or_else(|| reading.map(BookFilter::Reading))
            .or_else(|| finished.map(BookFilter::Finished))
            .or_else(|| (reading.is_none() && finished.is_none()).then_some(BookFilter::All))
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Name(name) => book.name.to_lowercase() == *name,
            BookFilter::Reading(reading) => book.reading == *reading,
            BookFilter::Finished(true) => book.is_read_through(),
            BookFilter::Finished(false) => book.read_page < book.page_count,
        }
    }
}

/// `data` payload of a successful creation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCreated {
    pub book_id: String,
}

/// `data` payload of a single book lookup
#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

/// `data` payload of a book listing
#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookShort>,
}
