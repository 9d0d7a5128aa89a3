//! Commerce error types.

use thiserror::Error;

/// Errors raised by domain rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Category not found by name.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Not a three-letter currency code.
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// A variant references an option the product does not declare.
    #[error("Variant {sku} uses undeclared option value {option}={value}")]
    UndeclaredOptionValue {
        sku: String,
        option: String,
        value: String,
    },

    /// Handle is not a valid URL slug.
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
