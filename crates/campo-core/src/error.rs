//! # Error Types
//!
//! Domain-specific error types for campo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  campo-core errors (this file)                                         │
//! │  ├── CoreError        - Draft / business rule failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  campo-db errors       └── DbError      - Local ledger failures        │
//! │  campo-client errors   └── ClientError  - REST backend failures        │
//! │  CLI errors            └── ApiError     - What the operator sees       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculators in [`crate::cash`] and [`crate::line_items`] never fail.
//! Every error here is raised at the input boundary, before numbers reach
//! them.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised while editing or submitting a draft.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale or quotation was submitted without any line items.
    #[error("{kind} must have at least one item")]
    NoItems { kind: String },

    /// A face value that is not part of the drawer layout.
    ///
    /// ## When This Occurs
    /// - `set_bill_count(3_000, ..)`: there is no 3000 bill
    /// - `set_coin_count(100_000, ..)`: that is a bill, not a coin
    #[error("Unknown {kind} denomination: {face}")]
    UnknownDenomination { kind: String, face: u32 },

    /// Removing a row that does not exist.
    #[error("No {kind} at position {index} (have {len})")]
    IndexOutOfRange {
        kind: String,
        index: usize,
        len: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an IndexOutOfRange error.
    pub fn index_out_of_range(kind: impl Into<String>, index: usize, len: usize) -> Self {
        CoreError::IndexOutOfRange {
            kind: kind.into(),
            index,
            len,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Amount above [`crate::MAX_AMOUNT`].
    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: Money },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., non-numeric label, malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a TooLarge error against [`crate::MAX_AMOUNT`].
    pub fn too_large(field: impl Into<String>) -> Self {
        ValidationError::TooLarge {
            field: field.into(),
            max: crate::MAX_AMOUNT,
        }
    }

    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
