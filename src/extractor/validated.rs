use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::{
    error::{ApiError, ValidationError},
    extractor::json::ApiJson,
    store::Book,
    traits::StateProvider,
    validation,
};

/// Extracts the request body as untyped JSON and runs it through the book
/// schema validator before the handler sees it.
///
/// Rejects with the full list of violated rules so the handler never touches
/// the store on bad input.
pub struct ValidatedBook(pub Book);

#[async_trait]
impl<S> FromRequest<S> for ValidatedBook
where
    S: Send + Sync + StateProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "validated_book_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(payload) = ApiJson::<Value>::from_request(req, state).await?;

        match validation::validate_book(&payload) {
            Ok(book) => {
                tracing::trace!(?book, "Validated");

                Ok(ValidatedBook(book))
            }
            Err(errors) => {
                tracing::warn!(?errors, "Validation errors");

                Err(ValidationError::new(errors).into())
            }
        }
    }
}
