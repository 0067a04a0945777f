use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ApiError, extractor::path::ApiPath, state::ApiState};

use super::BookPath;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBookResponse {
    pub message: String,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Deletes the book for the given ISBN.
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteBookResponse),
        (status = 404, description = "No book with this ISBN"),
    )
)]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(path): ApiPath<BookPath>,
) -> Result<DeleteBookResponse, ApiError> {
    state
        .store()
        .remove(&path.isbn)
        .await
        .map_err(|err| ApiError::from_store_error(state.error_verbosity(), err))?;

    Ok(DeleteBookResponse {
        message: "Book deleted".to_string(),
    })
}
