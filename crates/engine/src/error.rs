//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidRange`] thrown when a date range ends before it starts.
//! - [`InvalidTimestamp`] thrown when a source date cannot be parsed.
//! - [`InvalidAmount`] thrown when a source amount cannot be represented.
//! - [`InvalidPageSize`] thrown for a page size other than 5, 10 or 15.
//!
//!  [`InvalidRange`]: EngineError::InvalidRange
//!  [`InvalidTimestamp`]: EngineError::InvalidTimestamp
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidPageSize`]: EngineError::InvalidPageSize
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),
}
