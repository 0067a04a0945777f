use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod memory;
pub mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

/// The persisted book record. `isbn` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Book with ISBN {isbn} already exists")]
    Conflict { isbn: String },
    #[error("Book with ISBN {isbn} not found")]
    NotFound { isbn: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The persistence seam. Handlers receive an implementation through
/// [`ApiState`](crate::state::ApiState) so tests can substitute an in-memory
/// store.
#[axum::async_trait]
pub trait BookStore: Send + Sync {
    /// Inserts a new book. Fails with [`StoreError::Conflict`] if the ISBN is
    /// already taken.
    async fn create(&self, book: &Book) -> Result<Book, StoreError>;

    /// Returns all books, ordered by title ascending.
    async fn get_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Returns the book for `isbn`.
    async fn get_one(&self, isbn: &str) -> Result<Book, StoreError>;

    /// Replaces the mutable fields of the book identified by `isbn`.
    async fn update(&self, isbn: &str, book: &Book) -> Result<Book, StoreError>;

    /// Deletes the book for `isbn`.
    async fn remove(&self, isbn: &str) -> Result<(), StoreError>;
}
