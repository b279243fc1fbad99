use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::{Error, ErrorType};

/// HTTP response builder for Error enum
impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error_type {
            ErrorType::NotFound => StatusCode::NOT_FOUND,

            ErrorType::FailedValidation { .. } => StatusCode::BAD_REQUEST,
            ErrorType::ReasonTooShort { .. } => StatusCode::BAD_REQUEST,

            ErrorType::NotPrivileged => StatusCode::FORBIDDEN,

            ErrorType::FileTooSmall => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorType::FileTooLarge { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorType::FileTypeNotAllowed => StatusCode::BAD_REQUEST,

            ErrorType::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::InvalidOperation => StatusCode::BAD_REQUEST,
        };

        (status, Json(&self)).into_response()
    }
}
