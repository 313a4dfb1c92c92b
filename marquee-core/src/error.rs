//! Error type for the conversion boundary.

use thiserror::Error;

/// The single hard failure this crate produces.
///
/// Only civil-input parsing returns it; every display-oriented operation
/// degrades to a safe default instead of failing, so render paths never
/// need error handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Empty or grammatically malformed civil date-time input.
    #[error("invalid civil date-time: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
