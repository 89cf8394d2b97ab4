//! Transcript interpretation module.

mod parser;
pub mod rules;

pub use parser::{
    interpret, interpret_bytes, normalize_transcript, InterpretationResult, RuleInterpreter,
};

use crate::error::InterpretError;

/// Result type for interpretation operations.
pub type Result<T> = std::result::Result<T, InterpretError>;

/// Trait for transcript interpreters.
pub trait TranscriptInterpreter {
    /// Interpret one transcript.
    fn interpret(&self, transcript: &str) -> Result<InterpretationResult>;

    /// Interpret raw bytes, rejecting anything that is not UTF-8 text.
    fn interpret_bytes(&self, bytes: &[u8]) -> Result<InterpretationResult> {
        let transcript = std::str::from_utf8(bytes).map_err(|e| {
            InterpretError::InvalidInput(format!("transcript is not valid UTF-8: {}", e))
        })?;
        self.interpret(transcript)
    }
}
