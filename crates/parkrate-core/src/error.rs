//! # Error Types
//!
//! Domain-specific error types for parkrate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  parkrate-core errors (this file)                                      │
//! │  ├── CoreError        - Quote orchestration failures                   │
//! │  └── ValidationError  - Rule/discount/duration validation failures     │
//! │                                                                         │
//! │  parkrate-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: DbError → CoreError::Repository → caller                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - No rule matching the request (fallback rate applies)
//! - Unknown or missing timezone (UTC applies)
//! - Missing, expired or exhausted discount (no discount applies)
//! - Malformed rule window (the rule simply never matches)

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by the quote orchestrator.
///
/// The pure engine functions never fail; only the boundary around them does.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested duration cannot be priced.
    ///
    /// ## When This Occurs
    /// - Negative hours
    /// - NaN or infinite hours (e.g. a bad client-side division)
    #[error("Invalid duration: {hours} hours")]
    InvalidDuration { hours: f64 },

    /// A repository fetch failed.
    ///
    /// The engine performs no retries; timeouts and retries belong to the
    /// caller that owns the repository.
    #[error("Repository error: {0}")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Wraps any repository error.
    pub fn repository<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Repository(Box::new(err))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the write side (rule/discount creation) and by the quote
/// orchestrator for request parameters. Never raised mid-resolution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. unparseable time-of-day).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields must be provided together.
    #[error("{first} and {second} must both be set or both be empty")]
    Incomplete { first: String, second: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
