//! Rule-based stages of the transcript interpreter.

pub mod amounts;
pub mod category;
pub mod description;
pub mod direction;
pub mod enhance;
pub mod keywords;
pub mod numbers;
pub mod patterns;

pub use amounts::{extract_amount, parse_locale_numeral, AmountExtractor, AmountStrategy};
pub use category::{classify_category, score_categories, CategoryScore};
pub use description::{synthesize_description, truncate_description};
pub use direction::{classify_direction, match_direction};
pub use enhance::enhance_transcript;
pub use numbers::{lookup_number_word, parse_spoken_numbers, NumberWord};

use patterns::TOKEN;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A word or numeral with its byte span in the interpreted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Token<'_> {
    /// Whether the token is a numeral rather than a word.
    pub fn is_numeral(&self) -> bool {
        self.text.starts_with(|c: char| c.is_ascii_digit())
    }
}

/// Split text into word and numeral tokens, dropping punctuation.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    TOKEN
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}
