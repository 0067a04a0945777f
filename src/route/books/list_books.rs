use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ApiError, state::ApiState, store::Book};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Lists all books, ordered by title.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All books, ordered by title", body = ListBooksResponse),
    )
)]
pub async fn list_books(State(state): State<ApiState>) -> Result<ListBooksResponse, ApiError> {
    let books = state
        .store()
        .get_all()
        .await
        .map_err(|err| ApiError::from_store_error(state.error_verbosity(), err))?;

    Ok(ListBooksResponse { books })
}
