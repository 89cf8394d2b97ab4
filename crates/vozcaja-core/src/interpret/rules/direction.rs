//! Inflow / outflow classification.

use crate::models::transaction::Direction;

use super::keywords::{INFLOW_KEYWORDS, MIN_DIRECTION_KEYWORD_CHARS, OUTFLOW_KEYWORDS};

fn first_match(text: &str, keywords: &'static [&'static str]) -> Option<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|k| k.chars().count() > MIN_DIRECTION_KEYWORD_CHARS)
        .find(|k| text.contains(k))
}

/// The keyword that decided the direction, if any.
///
/// Any inflow keyword wins over every outflow keyword, so a sentence with
/// both ("cobré el pago") is an inflow.
pub fn match_direction(text: &str) -> Option<(Direction, &'static str)> {
    first_match(text, INFLOW_KEYWORDS)
        .map(|k| (Direction::Inflow, k))
        .or_else(|| first_match(text, OUTFLOW_KEYWORDS).map(|k| (Direction::Outflow, k)))
}

/// Classify a lower-cased transcript.
///
/// Without any keyword the movement is an outflow: expenses are the common
/// case in an expense tracker.
pub fn classify_direction(text: &str) -> Direction {
    match_direction(text)
        .map(|(direction, _)| direction)
        .unwrap_or_default()
}
