//! Correction pass for common speech-to-text slips.

use lazy_static::lazy_static;
use regex::Regex;

/// Whole-word replacements applied in order, case-insensitively.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("gastos", "gasté"),
    ("ingresos", "ingresé"),
    ("cobros", "cobré"),
    ("pagos", "pagué"),
    ("cinco mil", "5000"),
    ("diez mil", "10000"),
    ("veinte mil", "20000"),
    ("cincuenta mil", "50000"),
    ("cien mil", "100000"),
    ("medio", "0.5"),
    ("un cuarto", "0.25"),
    ("tres cuartos", "0.75"),
];

lazy_static! {
    static ref CORRECTION_PATTERNS: Vec<(Regex, &'static str)> = CORRECTIONS
        .iter()
        .map(|(wrong, right)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(wrong).replace(' ', r"\s+"));
            (Regex::new(&pattern).unwrap(), *right)
        })
        .collect();
}

/// Apply the correction table and close the sentence with a period.
///
/// Empty input stays empty.
pub fn enhance_transcript(transcript: &str) -> String {
    let trimmed = transcript.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut enhanced = trimmed.to_string();
    for (pattern, replacement) in CORRECTION_PATTERNS.iter() {
        enhanced = pattern.replace_all(&enhanced, *replacement).into_owned();
    }

    if !enhanced.ends_with(['.', '!', '?']) {
        enhanced.push('.');
    }

    enhanced
}
