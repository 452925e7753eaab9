//! # Error Types
//!
//! Error types used throughout the chequebook library.
//!
//! Only validation and I/O surfaces return errors. The converter, position
//! model, and print plan degrade to blank output instead.

use thiserror::Error;

/// Main error type for chequebook operations
#[derive(Debug, Error)]
pub enum ChequebookError {
    /// Form input rejected before a preview is generated
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Template image could not be loaded
    #[error("Template error: {0}")]
    Template(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid configuration or data file
    #[error("Config error: {0}")]
    Config(String),

    /// Network or server error
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a cheque form is not ready for preview. Messages are shown to
/// the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Payee name is required")]
    PayeeRequired,

    #[error("Payee name must be at least 2 characters")]
    PayeeTooShort,

    #[error("Payee name must contain at least one letter")]
    PayeeNoLetter,

    #[error("Payee name may only contain letters, digits, spaces, hyphens, apostrophes and periods")]
    PayeeInvalidCharacters,

    #[error("Amount is required")]
    AmountRequired,

    #[error("Amount must be a positive number with at most two decimal places")]
    AmountInvalid,

    #[error("Amount must be greater than zero")]
    AmountZero,

    #[error("Date is required")]
    DateRequired,

    #[error("Date '{0}' is not a valid YYYY-MM-DD date")]
    DateInvalid(String),

    #[error("Select a bank account before generating a preview")]
    CurrencyMissing,
}
