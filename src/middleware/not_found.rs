use crate::error::{ApiError, NotFoundError};

/// Fallback handler for requests that match no route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound(NotFoundError::new())
}
