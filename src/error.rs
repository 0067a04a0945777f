use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clap::ValueEnum;
use derive_more::From;
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreError;

/// How much diagnostic detail error responses carry.
///
/// The base response shape is fixed by the API contract. Verbosity only gates
/// the additional reason fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ErrorVerbosity {
    /// Server returns only the message for the error class.
    Message,
    /// Server returns the message and the underlying error reason.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

/// Wire shape of validation failures. The error list is surfaced verbatim,
/// regardless of verbosity.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    error: &'static str,
    #[serde(flatten)]
    detail: ApiError,
}

#[derive(Debug, From, Serialize)]
#[serde(untagged)]
/// API error
pub enum ApiError {
    /// Validation error
    ///
    /// This error is returned when the payload violates the book schema.
    Validation(ValidationError),
    /// Body error
    ///
    /// This error is returned when the body is not parsable at all.
    Body(BodyError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Not found error
    ///
    /// This error is returned when the requested resource is not found.
    NotFound(NotFoundError),
    /// Conflict error
    ///
    /// This error is returned when a created resource already exists.
    Conflict(ConflictError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
}

impl ApiError {
    /// Translates a [`StoreError`] into the matching API error.
    pub fn from_store_error(verbosity: ErrorVerbosity, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => NotFoundError::new().into(),
            StoreError::Conflict { isbn } => ConflictError::new(verbosity, isbn).into(),
            StoreError::Database(err) => {
                InternalServerError::from_generic_error(verbosity, err).into()
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(err) => err.status_code(),
            ApiError::Body(err) => err.status_code(),
            ApiError::Path(err) => err.status_code(),
            ApiError::NotFound(err) => err.status_code(),
            ApiError::Conflict(err) => err.status_code(),
            ApiError::MethodNotAllowed(err) => err.status_code(),
            ApiError::InternalServerError(err) => err.status_code(),
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Payload failed schema validation",
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::NotFound(_) => "The requested resource was not found",
            ApiError::Conflict(_) => "A book with this ISBN already exists",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::InternalServerError(_) => "An internal server error has occurred",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match self {
            ApiError::Validation(err) => {
                (status_code, Json(ValidationErrorResponse { errors: err.errors }))
                    .into_response()
            }
            other => {
                let error = other.message();

                (status_code, Json(ApiErrorResponse { error, detail: other })).into_response()
            }
        }
    }
}

/// The payload violated the book schema.
///
/// Carries one human-readable message per violated rule, in rule order.
#[derive(Debug, Serialize)]
pub struct ValidationError {
    #[serde(skip)]
    errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        ValidationError { errors }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, Serialize)]
pub struct BodyError {
    #[serde(skip_serializing_if = "Option::is_none")]
    body_error_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_expected_schema: Option<String>,
}

impl BodyError {
    pub fn new(
        verbosity: ErrorVerbosity,
        body_error_reason: String,
        body_expected_schema: String,
    ) -> Self {
        let (body_error_reason, body_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(body_error_reason), Some(body_expected_schema)),
                false => (None, None),
            };

        BodyError {
            body_error_reason,
            body_expected_schema,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, Serialize)]
pub struct PathError {
    #[serde(skip_serializing_if = "Option::is_none")]
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn new(verbosity: ErrorVerbosity, path_error_reason: String) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then(|| path_error_reason);

        PathError { path_error_reason }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {}

impl NotFoundError {
    pub fn new() -> Self {
        NotFoundError {}
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

impl Default for NotFoundError {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct ConflictError {
    #[serde(skip_serializing_if = "Option::is_none")]
    conflict_reason: Option<String>,
}

impl ConflictError {
    pub fn new(verbosity: ErrorVerbosity, isbn: String) -> Self {
        let conflict_reason = verbosity
            .should_generate_error_reason()
            .then(|| format!("Book with ISBN {isbn} already exists"));

        ConflictError { conflict_reason }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::CONFLICT
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {}

impl MethodNotAllowedError {
    pub fn new() -> Self {
        MethodNotAllowedError {}
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::METHOD_NOT_ALLOWED
    }
}

impl Default for MethodNotAllowedError {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip_serializing_if = "Option::is_none")]
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then(|| err);

        InternalServerError {
            internal_server_error,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
