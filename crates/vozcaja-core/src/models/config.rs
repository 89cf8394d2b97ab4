//! Configuration structures for the interpreter and its front ends.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VozcajaError};

/// Default limit on interpreted input, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 500;

/// Main configuration for vozcaja.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VozcajaConfig {
    /// Interpreter configuration.
    pub interpreter: InterpreterConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Transcript interpreter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Inputs longer than this many characters are truncated (or rejected in strict mode).
    pub max_input_chars: usize,

    /// Reject oversized input instead of truncating it.
    pub strict_length: bool,

    /// Run the speech-to-text correction pass before interpreting.
    pub enhance_transcript: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            strict_length: false,
            enhance_transcript: false,
        }
    }
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when none is given on the command line (json, csv, text).
    pub default_format: String,

    /// Currency symbol used in text output.
    pub currency_symbol: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl VozcajaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| VozcajaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| VozcajaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
