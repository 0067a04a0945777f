use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{Book, BookStore, StoreError};

/// In-memory [`BookStore`] backing isolated tests.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<HashMap<String, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[axum::async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, book: &Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;

        if books.contains_key(&book.isbn) {
            return Err(StoreError::Conflict {
                isbn: book.isbn.clone(),
            });
        }

        books.insert(book.isbn.clone(), book.clone());

        Ok(book.clone())
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().await;

        let mut books: Vec<Book> = books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(books)
    }

    async fn get_one(&self, isbn: &str) -> Result<Book, StoreError> {
        let books = self.books.read().await;

        books.get(isbn).cloned().ok_or_else(|| StoreError::NotFound {
            isbn: isbn.to_string(),
        })
    }

    async fn update(&self, isbn: &str, book: &Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;

        let entry = books.get_mut(isbn).ok_or_else(|| StoreError::NotFound {
            isbn: isbn.to_string(),
        })?;

        entry.title = book.title.clone();
        entry.author = book.author.clone();
        entry.publisher = book.publisher.clone();
        entry.year = book.year;

        Ok(entry.clone())
    }

    async fn remove(&self, isbn: &str) -> Result<(), StoreError> {
        let mut books = self.books.write().await;

        books.remove(isbn).map(|_| ()).ok_or_else(|| StoreError::NotFound {
            isbn: isbn.to_string(),
        })
    }
}
