use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ValidationError, ValidationErrorResponse},
    extractor::{path::ApiPath, validated::ValidatedBook},
    state::ApiState,
    store::Book,
};

use super::BookPath;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateBookResponse {
    pub book: Book,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Replaces the book identified by the path ISBN.
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = UpdateBookResponse),
        (status = 400, description = "Payload failed schema validation", body = ValidationErrorResponse),
        (status = 404, description = "No book with this ISBN"),
    )
)]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(path): ApiPath<BookPath>,
    ValidatedBook(book): ValidatedBook,
) -> Result<UpdateBookResponse, ApiError> {
    if book.isbn != path.isbn {
        return Err(ValidationError::new(vec![format!(
            "isbn in body ({}) must match isbn in path ({})",
            book.isbn, path.isbn
        )])
        .into());
    }

    let book = state
        .store()
        .update(&path.isbn, &book)
        .await
        .map_err(|err| ApiError::from_store_error(state.error_verbosity(), err))?;

    Ok(UpdateBookResponse { book })
}
