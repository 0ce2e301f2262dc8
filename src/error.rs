//!
//! # Error Handling
//!
//! `AppError` is the single error type flowing out of services, stores and
//! handlers. It implements `actix_web::error::ResponseError`, so a handler can
//! return `Result<_, AppError>` and the client receives a JSON body of the form
//! `{ "error": "..." }` with the matching status code.
//!
//! Server-side failures are logged here, at the HTTP boundary, and their
//! details are withheld from the response body.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned to the client for every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned for both unknown email and wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed or expired bearer token (HTTP 401).
    Unauthorized(String),
    /// Malformed request body or parameters (HTTP 400).
    BadRequest(String),
    /// Field-level validation failures (HTTP 400, with details).
    ValidationError(ValidationErrors),
    /// The resource already exists, e.g. a registered email (HTTP 400).
    Conflict(String),
    /// Login failed. Deliberately carries no detail (HTTP 400).
    InvalidCredentials,
    /// The resource does not exist or is not owned by the caller (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the database driver (HTTP 500).
    DatabaseError(String),
}

impl AppError {
    pub fn task_not_found() -> Self {
        AppError::NotFound("Task not found".into())
    }

    fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::InternalServerError(_) | AppError::DatabaseError(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(errors) => write!(f, "Validation Error: {}", errors),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidCredentials => write!(f, "{}", INVALID_CREDENTIALS_MESSAGE),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_server_error() {
            log::error!("{}", self);
        }

        let body = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg) => json!({ "error": msg }),
            AppError::ValidationError(errors) => json!({
                "error": "Validation failed",
                "details": errors
            }),
            AppError::InvalidCredentials => json!({ "error": INVALID_CREDENTIALS_MESSAGE }),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                json!({ "error": INTERNAL_ERROR_MESSAGE })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// `RowNotFound` becomes `NotFound`; every other driver error is a
/// `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        AppError::ValidationError(errors)
    }
}

/// Token decoding failures are treated as an authentication problem.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}
