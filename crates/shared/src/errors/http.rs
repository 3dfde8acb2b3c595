use crate::errors::{
    error::{ErrorResponse, ValidationErrorResponse},
    repository::RepositoryError,
    service::ServiceError,
};
use crate::validation::FieldError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";
pub const NOT_FOUND_MESSAGE: &str = "Producto no encontrado";

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Forbidden(String),
    Validation(Vec<FieldError>),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) | HttpError::Validation(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join(", ")),

            ServiceError::Repo(RepositoryError::NotFound) => {
                HttpError::NotFound(NOT_FOUND_MESSAGE.into())
            }

            ServiceError::Repo(other) => HttpError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            HttpError::Validation(errors) => {
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            HttpError::Internal(msg) => {
                error!("❌ Internal error: {msg}");
                let body = Json(ErrorResponse {
                    error: INTERNAL_ERROR_MESSAGE.into(),
                });
                (status, body).into_response()
            }
            HttpError::BadRequest(msg) | HttpError::NotFound(msg) | HttpError::Forbidden(msg) => {
                (status, Json(ErrorResponse { error: msg })).into_response()
            }
        }
    }
}
