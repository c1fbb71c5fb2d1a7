//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` used throughout the
//! application. All failures are recovered at the request boundary and
//! translated to a status code plus a short user-facing message; internal
//! detail (raw store errors) is logged server-side and never echoed to the
//! client.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers and
//! middleware can return it directly, and provides `From` impls for
//! `sqlx::Error`, `validator::ValidationErrors` and `bcrypt::BcryptError` so
//! the `?` operator works at call sites.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All failure modes a request can surface.
#[derive(Debug)]
pub enum AppError {
    /// Absent, malformed, invalid or expired credentials (HTTP 401).
    Unauthorized(String),
    /// Missing or invalid input (HTTP 400).
    BadRequest(String),
    /// Record absent or not owned by the caller (HTTP 404). The two cases are
    /// deliberately conflated so existence never leaks across owners.
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Store I/O failure, reported with a generic message (HTTP 400).
    DatabaseError(String),
    /// Request-body constraint violation from `validator` (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            // Store failures carry a generic per-operation message and answer 400.
            AppError::DatabaseError(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`. The raw error is logged; the
/// client sees only a generic message.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            other => {
                log::error!("database error: {}", other);
                AppError::DatabaseError("Database operation failed".into())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        log::error!("bcrypt error: {}", error);
        AppError::InternalServerError("Password processing failed".into())
    }
}
