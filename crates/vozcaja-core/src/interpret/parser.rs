//! Rule-based transcript interpreter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::InterpretError;
use crate::models::config::{InterpreterConfig, DEFAULT_MAX_INPUT_CHARS};
use crate::models::transaction::{Direction, ParsedTransaction};

use super::rules::{
    amounts::AmountExtractor,
    category::classify_category,
    description::synthesize_description,
    direction::match_direction,
    enhance::enhance_transcript,
    ExtractionMatch,
};
use super::{Result, TranscriptInterpreter};

/// Result of interpreting one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretationResult {
    /// The extracted movement.
    pub transaction: ParsedTransaction,
    /// Text the stages actually ran on (bounded, optionally enhanced, lower-cased).
    pub normalized_text: String,
    /// Amount strategy that produced the amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_strategy: Option<String>,
    /// Fragment of the text the amount was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_source: Option<String>,
    /// Interpretation warnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Processing time in microseconds.
    pub processing_time_us: u64,
}

impl InterpretationResult {
    /// Whether the caller may record the movement.
    pub fn is_complete(&self) -> bool {
        self.transaction.has_amount()
    }
}

/// Rule-based interpreter with configurable input handling.
pub struct RuleInterpreter {
    /// Input limit in characters (0 = unlimited).
    max_input_chars: usize,
    /// Reject oversized input instead of truncating it.
    strict_length: bool,
    /// Run the speech-to-text correction pass first.
    enhance: bool,
    amounts: AmountExtractor,
}

impl RuleInterpreter {
    /// Create a new interpreter with default settings.
    pub fn new() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            strict_length: false,
            enhance: false,
            amounts: AmountExtractor::new(),
        }
    }

    /// Create an interpreter from configuration.
    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new()
            .with_max_input_chars(config.max_input_chars)
            .with_strict_length(config.strict_length)
            .with_transcript_enhancement(config.enhance_transcript)
    }

    /// Set the input limit in characters (0 = unlimited).
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    /// Reject oversized input instead of truncating it.
    pub fn with_strict_length(mut self, strict: bool) -> Self {
        self.strict_length = strict;
        self
    }

    /// Enable the speech-to-text correction pass.
    pub fn with_transcript_enhancement(mut self, enhance: bool) -> Self {
        self.enhance = enhance;
        self
    }

    /// Apply the length limit to a trimmed transcript.
    fn bound<'a>(&self, transcript: &'a str, warnings: &mut Vec<String>) -> Result<&'a str> {
        let length = transcript.chars().count();
        if self.max_input_chars == 0 || length <= self.max_input_chars {
            return Ok(transcript);
        }

        if self.strict_length {
            warn!("Rejecting transcript of {} characters", length);
            return Err(InterpretError::InputTooLong {
                length,
                max: self.max_input_chars,
            });
        }

        warn!(
            "Truncating transcript from {} to {} characters",
            length, self.max_input_chars
        );
        warnings.push(format!(
            "input truncated to {} characters",
            self.max_input_chars
        ));
        Ok(truncate_chars(transcript, self.max_input_chars))
    }
}

impl Default for RuleInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptInterpreter for RuleInterpreter {
    fn interpret(&self, transcript: &str) -> Result<InterpretationResult> {
        let elapsed = stopwatch();
        let mut warnings = Vec::new();

        let bounded = self.bound(transcript.trim(), &mut warnings)?;
        let text = if self.enhance {
            normalize_transcript(&enhance_transcript(bounded))
        } else {
            normalize_transcript(bounded)
        };

        info!("Interpreting transcript of {} characters", text.chars().count());

        let (transaction, found) = run_stages(&text, &self.amounts);

        if found.is_none() {
            warn!("Amount not detected in {:?}", text);
            warnings.push("amount not detected".to_string());
        }

        let (amount_strategy, amount_source) = match found {
            Some((name, m)) => (Some(name.to_string()), Some(m.source)),
            None => (None, None),
        };

        Ok(InterpretationResult {
            transaction,
            normalized_text: text,
            amount_strategy,
            amount_source,
            warnings,
            processing_time_us: elapsed(),
        })
    }
}

/// Lower-case and trim a transcript.
pub fn normalize_transcript(transcript: &str) -> String {
    transcript.to_lowercase().trim().to_string()
}

/// Interpret a transcript with default settings.
///
/// Never fails: unusable text gives an outflow in [`Category::Other`] with a
/// zero amount, which callers must treat as "amount not understood".
///
/// [`Category::Other`]: crate::models::transaction::Category::Other
pub fn interpret(transcript: &str) -> ParsedTransaction {
    let bounded = truncate_chars(transcript.trim(), DEFAULT_MAX_INPUT_CHARS);
    run_stages(&normalize_transcript(bounded), &AmountExtractor::new()).0
}

/// Interpret raw bytes with default settings, rejecting non-UTF-8 input.
pub fn interpret_bytes(bytes: &[u8]) -> Result<ParsedTransaction> {
    RuleInterpreter::new()
        .interpret_bytes(bytes)
        .map(|r| r.transaction)
}

/// Run the four stages over normalized text.
fn run_stages(
    text: &str,
    amounts: &AmountExtractor,
) -> (ParsedTransaction, Option<(&'static str, ExtractionMatch<Decimal>)>) {
    let direction = match match_direction(text) {
        Some((direction, keyword)) => {
            debug!("Direction {:?} from keyword {:?}", direction, keyword);
            direction
        }
        None => {
            debug!("No direction keyword, defaulting to outflow");
            Direction::default()
        }
    };

    let found = amounts.extract_with_strategy(text);
    let amount = found
        .as_ref()
        .map(|(_, m)| m.value)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
        .normalize();

    let category = classify_category(text);
    debug!("Category {:?}", category);

    let description = synthesize_description(text, direction, category);

    (
        ParsedTransaction {
            direction,
            amount,
            description,
            category,
        },
        found,
    )
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn stopwatch() -> impl Fn() -> u64 {
    let start = std::time::Instant::now();
    move || start.elapsed().as_micros() as u64
}

// No monotonic clock on wasm32-unknown-unknown.
#[cfg(target_arch = "wasm32")]
fn stopwatch() -> impl Fn() -> u64 {
    || 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::rules::category::classify_category;
    use crate::models::transaction::{Category, MAX_DESCRIPTION_CHARS};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SAMPLES: &[&str] = &[
        "gasté 5000 en comida",
        "ingresé 3000 por mi trabajo",
        "pagué diez mil pesos de alquiler",
        "cobré dos mil setecientos cuarenta y dos",
        "compré algo",
        "",
        "   ",
        "¿?!",
        "me pagaron 1.234,56 dólares por el proyecto de diseño para el cliente nuevo",
        "millones millones millones millones millones millones",
        "99999999999999999999999999999999999 pesos",
        "una pizza y dos empanadas",
    ];

    #[test]
    fn test_expense_with_digits() {
        let txn = interpret("Gasté 5000 en comida");
        assert_eq!(
            txn,
            ParsedTransaction {
                direction: Direction::Outflow,
                amount: dec("5000"),
                description: "Comida".to_string(),
                category: Category::Food,
            }
        );
    }

    #[test]
    fn test_income_from_work() {
        let txn = interpret("ingresé 3000 por mi trabajo");
        assert_eq!(txn.direction, Direction::Inflow);
        assert_eq!(txn.amount, dec("3000"));
        assert_eq!(txn.category, Category::Salary);
        assert!(txn.description.contains("Trabajo"));
    }

    #[test]
    fn test_spoken_magnitude() {
        let txn = interpret("pagué diez mil pesos de alquiler");
        assert_eq!(txn.direction, Direction::Outflow);
        assert_eq!(txn.amount, dec("10000"));
        assert_eq!(txn.category, Category::Home);
        assert_eq!(txn.description, "Hogar");
    }

    #[test]
    fn test_compound_spoken_number() {
        let result = RuleInterpreter::new()
            .interpret("cobré dos mil setecientos cuarenta y dos")
            .unwrap();

        assert_eq!(result.transaction.amount, dec("2742"));
        assert_eq!(result.transaction.direction, Direction::Inflow);
        assert_eq!(result.amount_strategy.as_deref(), Some("magnitude_phrase"));
        assert_eq!(
            result.amount_source.as_deref(),
            Some("dos mil setecientos cuarenta y dos")
        );
    }

    #[test]
    fn test_missing_amount() {
        let result = RuleInterpreter::new().interpret("compré algo").unwrap();

        assert_eq!(result.transaction.amount, Decimal::ZERO);
        assert!(!result.is_complete());
        assert_eq!(result.warnings, vec!["amount not detected".to_string()]);
        assert_eq!(result.transaction.description, "Algo");
    }

    #[test]
    fn test_invariants_hold_for_all_samples() {
        for sample in SAMPLES {
            let txn = interpret(sample);
            assert!(txn.amount >= Decimal::ZERO, "{:?}", sample);
            assert!(Category::ALL.contains(&txn.category), "{:?}", sample);
            assert!(!txn.description.is_empty(), "{:?}", sample);
            assert!(txn.description.chars().count() <= MAX_DESCRIPTION_CHARS, "{:?}", sample);
        }
    }

    #[test]
    fn test_pure() {
        for sample in SAMPLES {
            assert_eq!(interpret(sample), interpret(sample));
        }
    }

    #[test]
    fn test_defaults() {
        let txn = interpret("");
        assert_eq!(txn.direction, Direction::Outflow);
        assert_eq!(txn.category, Category::Other);
        assert_eq!(txn.amount, Decimal::ZERO);
        assert_eq!(txn.description, "Gasto");
    }

    #[test]
    fn test_inflow_precedence() {
        let txn = interpret("gasté lo que cobré, 200");
        assert_eq!(txn.direction, Direction::Inflow);
    }

    #[test]
    fn test_description_round_trip() {
        for sample in SAMPLES {
            let description = interpret(sample).description.to_lowercase();
            assert_eq!(classify_category(&description), classify_category(&description));
        }
    }

    #[test]
    fn test_truncates_long_input() {
        let long = format!("gasté 300 en {}", "pan ".repeat(200));
        let result = RuleInterpreter::new()
            .with_max_input_chars(100)
            .interpret(&long)
            .unwrap();

        assert_eq!(result.normalized_text.chars().count(), 100);
        assert_eq!(result.transaction.amount, dec("300"));
        assert_eq!(
            result.warnings,
            vec!["input truncated to 100 characters".to_string()]
        );
    }

    #[test]
    fn test_strict_length() {
        let interpreter = RuleInterpreter::new()
            .with_max_input_chars(10)
            .with_strict_length(true);

        let err = interpreter.interpret("gasté 5000 en comida").unwrap_err();
        assert_eq!(err, InterpretError::InputTooLong { length: 20, max: 10 });

        assert!(interpreter.interpret("gasté 50").is_ok());
    }

    #[test]
    fn test_unlimited_length() {
        let long = format!("{} 50", "pan ".repeat(300));
        let result = RuleInterpreter::new()
            .with_max_input_chars(0)
            .interpret(&long)
            .unwrap();
        assert_eq!(result.transaction.amount, dec("50"));
    }

    #[test]
    fn test_enhancement() {
        let interpreter = RuleInterpreter::new().with_transcript_enhancement(true);
        let result = interpreter.interpret("Gastos medio en propina").unwrap();

        assert_eq!(result.normalized_text, "gasté 0.5 en propina.");
        assert_eq!(result.transaction.amount, dec("0.5"));
        assert_eq!(result.transaction.description, "Propina");
    }

    #[test]
    fn test_from_config() {
        let config = InterpreterConfig {
            max_input_chars: 5,
            strict_length: true,
            enhance_transcript: false,
        };
        let interpreter = RuleInterpreter::from_config(&config);
        assert!(matches!(
            interpreter.interpret("gasté 5000"),
            Err(InterpretError::InputTooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_bytes() {
        let err = interpret_bytes(&[0x67, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, InterpretError::InvalidInput(_)));

        let txn = interpret_bytes("gasté 20 en café".as_bytes()).unwrap();
        assert_eq!(txn.amount, dec("20"));
    }

    #[test]
    fn test_result_serialization() {
        let result = RuleInterpreter::new().interpret("gasté 5 mil en nafta").unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["transaction"]["amount"], "5000");
        assert_eq!(json["transaction"]["category"], "transport");
        assert_eq!(json["amount_strategy"], "magnitude_phrase");
        assert!(json.get("warnings").is_none());
    }
}
