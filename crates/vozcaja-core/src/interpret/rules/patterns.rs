//! Common regex patterns for transcript interpretation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Word or numeral token; "5mil" splits into "5" and "mil"
    pub static ref TOKEN: Regex = Regex::new(
        r"\d+(?:[.,]\d+)*|\p{L}+"
    ).unwrap();

    // Numeral with optional "." / "," separators (1.234,56 / 1,234.56 / 10.000 / 2,5)
    pub static ref NUMERAL: Regex = Regex::new(
        r"\d+(?:[.,]\d+)*"
    ).unwrap();

    // Numeral, alone or glued to a word ("5mil", "2k")
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"^\d+(?:[.,]\d+)*\p{L}*$"
    ).unwrap();

    // Plain integer without separators
    pub static ref PLAIN_INTEGER: Regex = Regex::new(
        r"^\d+$"
    ).unwrap();

    // Thousands grouping with dots (10.000, 1.000.000)
    pub static ref DOT_GROUPED: Regex = Regex::new(
        r"^\d{1,3}(?:\.\d{3})+$"
    ).unwrap();

    // Thousands grouping with commas (10,000, 1,000,000)
    pub static ref COMMA_GROUPED: Regex = Regex::new(
        r"^\d{1,3}(?:,\d{3})+$"
    ).unwrap();

    // Single separator followed by one or two digits (10.50, 2.5)
    pub static ref SHORT_FRACTION: Regex = Regex::new(
        r"^\d+[.,]\d{1,2}$"
    ).unwrap();
}

/// Punctuation trimmed from the edges of whitespace-separated words.
pub const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '¡', '¿', '"', '\'', '(', ')', '$', '€',
];
