//! Error types for the vozcaja-core library.

use thiserror::Error;

/// Main error type for the vozcaja library.
#[derive(Error, Debug)]
pub enum VozcajaError {
    /// Transcript interpretation error.
    #[error("interpretation error: {0}")]
    Interpret(#[from] InterpretError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised at the interpreter boundary.
///
/// Malformed or meaningless text is never an error; it yields a transaction
/// with default fields and a zero amount instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// The input is not text (non-UTF-8 bytes, or a non-string value from a binding).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The input exceeds the configured length limit and strict mode is on.
    #[error("input is {length} characters long, limit is {max}")]
    InputTooLong { length: usize, max: usize },
}

/// Result type for the vozcaja library.
pub type Result<T> = std::result::Result<T, VozcajaError>;
