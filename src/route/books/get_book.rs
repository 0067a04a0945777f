use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ApiError, extractor::path::ApiPath, state::ApiState, store::Book};

use super::BookPath;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetBookResponse {
    pub book: Book,
}

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Returns the book for the given ISBN.
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "The requested book", body = GetBookResponse),
        (status = 404, description = "No book with this ISBN"),
    )
)]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(path): ApiPath<BookPath>,
) -> Result<GetBookResponse, ApiError> {
    let book = state
        .store()
        .get_one(&path.isbn)
        .await
        .map_err(|err| ApiError::from_store_error(state.error_verbosity(), err))?;

    Ok(GetBookResponse { book })
}
