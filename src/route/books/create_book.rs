use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ValidationErrorResponse},
    extractor::validated::ValidatedBook,
    state::ApiState,
    store::Book,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Creates a new book.
#[utoipa::path(
    post,
    path = "/books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = CreateBookResponse),
        (status = 400, description = "Payload failed schema validation", body = ValidationErrorResponse),
        (status = 409, description = "A book with this ISBN already exists"),
    )
)]
pub async fn create_book(
    State(state): State<ApiState>,
    ValidatedBook(book): ValidatedBook,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .store()
        .create(&book)
        .await
        .map_err(|err| ApiError::from_store_error(state.error_verbosity(), err))?;

    Ok(CreateBookResponse { book })
}
