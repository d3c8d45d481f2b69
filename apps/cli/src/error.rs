//! # CLI Error Type
//!
//! Every command returns `Result<T, ApiError>`. Lower-level errors are
//! mapped here: internals (SQL, transport) are logged with `tracing` and a
//! generic message is shown; input and backend rejections are shown as-is.
//!
//! ```text
//! DbError ────────┐
//! CoreError ──────┤
//! ValidationError ┼──► ApiError { code, message } ──► stderr, exit 1
//! ClientError ────┘                                   (or JSON with --json)
//! ```

use campo_client::ClientError;
use campo_core::{CoreError, ValidationError};
use campo_db::DbError;
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

/// What a failed command reports.
///
/// With `--json` it is printed as:
/// ```json
/// { "code": "NOT_FOUND", "message": "Sale not found: 8c1e…" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    DatabaseError,
    /// The backend rejected the request or could not be reached.
    BackendError,
    Unauthorized,
    ConfigError,
    BusinessLogic,
    Cancelled,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cancelled() -> Self {
        ApiError::new(ErrorCode::Cancelled, "Cancelled before the result arrived")
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::CheckViolation { message } => {
                tracing::error!("Check constraint failed: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Record rejected by the ledger")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not open the local ledger")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Corrupt(e) => {
                tracing::error!("Corrupt ledger row: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Stored record could not be read")
            }
            DbError::PoolExhausted => ApiError::new(ErrorCode::DatabaseError, "Database is busy"),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::NoItems { .. } => ApiError::new(ErrorCode::ValidationError, err.to_string()),
            CoreError::UnknownDenomination { .. } | CoreError::IndexOutOfRange { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(e) => e.into(),
            ClientError::LoginRejected { message, .. } => ApiError::new(ErrorCode::Unauthorized, message),
            ClientError::Api { status, body } => match status {
                401 | 403 => ApiError::new(
                    ErrorCode::Unauthorized,
                    "Backend refused the request; run `campo login` first",
                ),
                404 => ApiError::new(ErrorCode::NotFound, format!("Backend: {}", body_or_status(&body, status))),
                _ => ApiError::new(
                    ErrorCode::BackendError,
                    format!("Backend returned {}: {}", status, body_or_status(&body, status)),
                ),
            },
            ClientError::Transport(e) => {
                tracing::error!("Backend unreachable: {}", e);
                ApiError::new(ErrorCode::BackendError, "Could not reach the backend")
            }
            ClientError::Decode(e) => {
                tracing::error!("Unexpected backend response: {}", e);
                ApiError::new(ErrorCode::BackendError, "Backend sent an unexpected response")
            }
            other @ (ClientError::InvalidUrl(_)
            | ClientError::InvalidConfig(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_)) => ApiError::new(ErrorCode::ConfigError, other.to_string()),
        }
    }
}

fn body_or_status(body: &str, status: u16) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
