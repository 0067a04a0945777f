use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{Book, BookStore, StoreError};

/// PostgreSQL-backed [`BookStore`].
///
/// Holds the pool acquired at process start; individual requests borrow a
/// connection for one statement at a time. Row-level locking is left to the
/// database engine.
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip_all)]
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().connect(database_url).await?;

        tracing::info!("Connected to database");

        Ok(Self { pool })
    }

    /// Creates the `books` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS books (
                isbn TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                publisher TEXT NOT NULL,
                year INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[axum::async_trait]
impl BookStore for PgBookStore {
    #[tracing::instrument(skip_all, fields(isbn = %book.isbn))]
    async fn create(&self, book: &Book) -> Result<Book, StoreError> {
        let created = sqlx::query_as::<_, Book>(
            "INSERT INTO books (isbn, title, author, publisher, year)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING isbn, title, author, publisher, year",
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict {
                    isbn: book.isbn.clone(),
                }
            }
            _ => StoreError::Database(err),
        })?;

        Ok(created)
    }

    #[tracing::instrument(skip_all)]
    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT isbn, title, author, publisher, year FROM books ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    #[tracing::instrument(skip_all, fields(%isbn))]
    async fn get_one(&self, isbn: &str) -> Result<Book, StoreError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT isbn, title, author, publisher, year FROM books WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            isbn: isbn.to_string(),
        })?;

        Ok(book)
    }

    #[tracing::instrument(skip_all, fields(%isbn))]
    async fn update(&self, isbn: &str, book: &Book) -> Result<Book, StoreError> {
        let updated = sqlx::query_as::<_, Book>(
            "UPDATE books SET title = $2, author = $3, publisher = $4, year = $5
             WHERE isbn = $1
             RETURNING isbn, title, author, publisher, year",
        )
        .bind(isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(book.year)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            isbn: isbn.to_string(),
        })?;

        Ok(updated)
    }

    #[tracing::instrument(skip_all, fields(%isbn))]
    async fn remove(&self, isbn: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                isbn: isbn.to_string(),
            });
        }

        Ok(())
    }
}
