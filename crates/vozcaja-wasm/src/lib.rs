//! WASM bindings for the vozcaja transcript interpreter.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use vozcaja_core::models::config::InterpreterConfig;
use vozcaja_core::{Category, InterpretError, RuleInterpreter, TranscriptInterpreter};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Read a transcript out of an arbitrary JS value.
fn transcript_from(value: &JsValue) -> Result<String, JsValue> {
    value.as_string().ok_or_else(|| {
        to_js_error(InterpretError::InvalidInput(
            "transcript must be a string".to_string(),
        ))
    })
}

/// Interpret a transcript into a movement.
///
/// Rejects anything that is not a string. Text without an amount still
/// yields a movement, with `amount` set to `"0"`.
#[wasm_bindgen]
pub fn interpret(value: JsValue) -> Result<JsValue, JsValue> {
    let transcript = transcript_from(&value)?;
    let transaction = vozcaja_core::interpret(&transcript);

    serde_wasm_bindgen::to_value(&transaction).map_err(to_js_error)
}

/// Extract only the amount (0 when none is found).
#[wasm_bindgen]
pub fn extract_amount(text: &str) -> f64 {
    vozcaja_core::extract_amount(&text.to_lowercase())
        .to_f64()
        .unwrap_or(0.0)
}

/// Apply the speech-to-text correction pass.
#[wasm_bindgen]
pub fn enhance_transcript(text: &str) -> String {
    vozcaja_core::enhance_transcript(text)
}

#[derive(Serialize)]
struct CategoryInfo {
    key: &'static str,
    label: &'static str,
}

/// List every category as `{ key, label }`.
#[wasm_bindgen]
pub fn categories() -> Result<JsValue, JsValue> {
    let list: Vec<CategoryInfo> = Category::ALL
        .iter()
        .map(|c| CategoryInfo {
            key: c.key(),
            label: c.label(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&list).map_err(to_js_error)
}

/// Transcript parser class for browser use.
#[wasm_bindgen]
pub struct TranscriptParser {
    config: InterpreterConfig,
    interpreter: RuleInterpreter,
}

#[wasm_bindgen]
impl TranscriptParser {
    /// Create a new parser with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = InterpreterConfig::default();
        Self {
            interpreter: RuleInterpreter::from_config(&config),
            config,
        }
    }

    /// Set the input limit in characters (0 = unlimited).
    #[wasm_bindgen]
    pub fn set_max_input_chars(&mut self, max: usize) {
        self.config.max_input_chars = max;
        self.rebuild();
    }

    /// Reject oversized input instead of truncating it.
    #[wasm_bindgen]
    pub fn set_strict_length(&mut self, strict: bool) {
        self.config.strict_length = strict;
        self.rebuild();
    }

    /// Run the correction pass before interpreting.
    #[wasm_bindgen]
    pub fn set_enhance(&mut self, enhance: bool) {
        self.config.enhance_transcript = enhance;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.interpreter = RuleInterpreter::from_config(&self.config);
    }

    /// Interpret a transcript into a movement.
    #[wasm_bindgen]
    pub fn parse(&self, value: JsValue) -> Result<JsValue, JsValue> {
        let transcript = transcript_from(&value)?;
        let result = self.interpreter.interpret(&transcript).map_err(to_js_error)?;

        serde_wasm_bindgen::to_value(&result.transaction).map_err(to_js_error)
    }

    /// Interpret a transcript and return the movement with its metadata.
    #[wasm_bindgen]
    pub fn parse_with_details(&self, value: JsValue) -> Result<JsValue, JsValue> {
        let transcript = transcript_from(&value)?;
        let result = self.interpreter.interpret(&transcript).map_err(to_js_error)?;

        serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}
