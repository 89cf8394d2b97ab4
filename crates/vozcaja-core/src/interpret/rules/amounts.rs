//! Amount extraction for spoken Spanish transcripts.
//!
//! Strategies run in a fixed order and the first one producing a positive
//! amount wins:
//!
//! 1. [`MagnitudePhraseStrategy`]: "5 mil", "diez mil", "mil pesos", "2,5 millones",
//!    and spoken compounds holding a magnitude word.
//! 2. [`BareNumeralStrategy`]: the largest numeral written with digits.
//! 3. [`SpokenNumberStrategy`]: spoken numbers without a magnitude word ("trescientos veinte").

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::numbers::{leading_spoken_value, lookup_number_word, parse_spoken_numbers, spoken_runs};
use super::patterns::{COMMA_GROUPED, DOT_GROUPED, NUMERAL, PLAIN_INTEGER, SHORT_FRACTION};
use super::{tokenize, ExtractionMatch, FieldExtractor, Token};

/// One link of the amount extraction chain.
pub trait AmountStrategy: Sync {
    /// Name reported in interpretation details.
    fn name(&self) -> &'static str;

    /// Extract an amount, or `None` when the strategy does not apply.
    fn extract(&self, text: &str) -> Option<ExtractionMatch<Decimal>>;
}

/// Default strategy chain, in priority order.
pub const DEFAULT_STRATEGIES: &[&dyn AmountStrategy] = &[
    &MagnitudePhraseStrategy,
    &BareNumeralStrategy,
    &SpokenNumberStrategy,
];

/// Amount field extractor running a chain of strategies.
pub struct AmountExtractor {
    strategies: &'static [&'static dyn AmountStrategy],
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            strategies: DEFAULT_STRATEGIES,
        }
    }

    /// Use a custom strategy chain.
    pub fn with_strategies(strategies: &'static [&'static dyn AmountStrategy]) -> Self {
        Self { strategies }
    }

    /// First positive amount in chain order, with the name of the strategy that found it.
    pub fn extract_with_strategy(&self, text: &str) -> Option<(&'static str, ExtractionMatch<Decimal>)> {
        self.strategies.iter().find_map(|strategy| {
            let found = strategy
                .extract(text)
                .filter(|m| m.value > Decimal::ZERO)?;
            debug!(
                "Amount {} found by {} in {:?}",
                found.value,
                strategy.name(),
                found.source
            );
            Some((strategy.name(), found))
        })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_with_strategy(text).map(|(_, m)| m)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.strategies
            .iter()
            .filter_map(|strategy| strategy.extract(text))
            .filter(|m| m.value > Decimal::ZERO)
            .collect()
    }
}

/// Extract the amount of a transcript. Zero means no amount was found.
pub fn extract_amount(text: &str) -> Decimal {
    AmountExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
        .normalize()
}

/// Parse a numeral whose `.` and `,` may be either grouping or decimal separators.
///
/// The heuristic, in order:
/// - both `.` and `,`: the rightmost one is the decimal separator ("1.234,56", "1,234.56");
/// - only `.`: a single `.` followed by one or two digits is decimal ("10.50");
///   3-digit groups are thousands ("10.000", "1.000.000"); any other single `.`
///   is decimal ("1.2345"); anything else is rejected;
/// - only `,`: a single `,` is decimal ("2,5", and also "5,000");
///   several `,` in 3-digit groups are thousands ("1,000,000"); anything else is rejected.
pub fn parse_locale_numeral(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let normalized = match (s.contains('.'), s.contains(',')) {
        (false, false) => s.to_string(),
        (true, true) => {
            let decimal_pos = s.rfind(['.', ','])?;
            let integer_part = s[..decimal_pos].replace(['.', ','], "");
            format!("{}.{}", integer_part, &s[decimal_pos + 1..])
        }
        (true, false) => {
            if SHORT_FRACTION.is_match(s) {
                s.to_string()
            } else if DOT_GROUPED.is_match(s) {
                s.replace('.', "")
            } else if s.matches('.').count() == 1 {
                s.to_string()
            } else {
                return None;
            }
        }
        (false, true) => {
            if s.matches(',').count() == 1 {
                s.replace(',', ".")
            } else if COMMA_GROUPED.is_match(s) {
                s.replace(',', "")
            } else {
                return None;
            }
        }
    };

    Decimal::from_str(&normalized).ok()
}

fn max_match(matches: impl Iterator<Item = ExtractionMatch<Decimal>>) -> Option<ExtractionMatch<Decimal>> {
    matches
        .filter(|m| m.value > Decimal::ZERO)
        .max_by(|a, b| a.value.cmp(&b.value))
}

/// A magnitude word with its quantifier.
///
/// A digit quantifier multiplies the magnitude ("5 mil", "2,5 millones") and
/// may carry a tail: a spoken number below the magnitude ("5 mil quinientos")
/// or exactly three digits after "mil" ("2 mil 500"). Otherwise the value is
/// the whole spoken run holding the magnitude word ("diez mil",
/// "dos mil setecientos cuarenta y dos", "mil").
pub struct MagnitudePhraseStrategy;

impl MagnitudePhraseStrategy {
    const CONFIDENCE: f32 = 0.9;

    fn phrase(text: &str, tokens: &[Token<'_>], index: usize, magnitude: Decimal) -> Option<ExtractionMatch<Decimal>> {
        let word = &tokens[index];

        let (value, start, end) = match index.checked_sub(1).map(|i| &tokens[i]) {
            Some(q) if q.is_numeral() => {
                let base = parse_locale_numeral(q.text)?.checked_mul(magnitude)?;
                match Self::tail_value(&tokens[index + 1..], magnitude) {
                    Some((extra, end)) => (base.checked_add(extra)?, q.start, end),
                    None => (base, q.start, word.end),
                }
            }
            _ => spoken_runs(tokens)
                .into_iter()
                .find(|(_, start, end)| *start <= word.start && word.end <= *end)?,
        };

        Some(ExtractionMatch::new(value, Self::CONFIDENCE, &text[start..end]).with_position(start, end))
    }

    /// Amount added after a digit quantifier.
    fn tail_value(tail: &[Token<'_>], magnitude: Decimal) -> Option<(Decimal, usize)> {
        let first = tail.first()?;
        let (value, end) = if PLAIN_INTEGER.is_match(first.text) {
            let next_is_magnitude = tail
                .get(1)
                .and_then(|t| lookup_number_word(t.text))
                .and_then(|w| w.magnitude())
                .is_some();
            if first.text.len() != 3 || magnitude != Decimal::ONE_THOUSAND || next_is_magnitude {
                return None;
            }
            (Decimal::from_str(first.text).ok()?, first.end)
        } else {
            leading_spoken_value(tail)?
        };
        (value < magnitude).then_some((value, end))
    }
}

impl AmountStrategy for MagnitudePhraseStrategy {
    fn name(&self) -> &'static str {
        "magnitude_phrase"
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Decimal>> {
        let tokens = tokenize(text);
        max_match(tokens.iter().enumerate().filter_map(|(i, token)| {
            let magnitude = lookup_number_word(token.text)?.magnitude()?;
            Self::phrase(text, &tokens, i, magnitude)
        }))
    }
}

/// The largest numeral written with digits.
///
/// The amount is usually the largest number mentioned; smaller ones tend to
/// be quantities or dates.
pub struct BareNumeralStrategy;

impl AmountStrategy for BareNumeralStrategy {
    fn name(&self) -> &'static str {
        "bare_numeral"
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Decimal>> {
        max_match(NUMERAL.find_iter(text).filter_map(|m| {
            let value = parse_locale_numeral(m.as_str())?;
            Some(ExtractionMatch::new(value, 0.8, m.as_str()).with_position(m.start(), m.end()))
        }))
    }
}

/// The largest fully spoken number.
pub struct SpokenNumberStrategy;

impl AmountStrategy for SpokenNumberStrategy {
    fn name(&self) -> &'static str {
        "spoken_number"
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Decimal>> {
        max_match(parse_spoken_numbers(text).into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_locale_numeral() {
        assert_eq!(parse_locale_numeral("5000"), Some(dec("5000")));
        assert_eq!(parse_locale_numeral("10.000"), Some(dec("10000")));
        assert_eq!(parse_locale_numeral("1.000.000"), Some(dec("1000000")));
        assert_eq!(parse_locale_numeral("10.50"), Some(dec("10.50")));
        assert_eq!(parse_locale_numeral("2.5"), Some(dec("2.5")));
        assert_eq!(parse_locale_numeral("1.2345"), Some(dec("1.2345")));
        assert_eq!(parse_locale_numeral("1.23.45"), None);
    }

    #[test]
    fn test_parse_locale_numeral_commas() {
        assert_eq!(parse_locale_numeral("2,5"), Some(dec("2.5")));
        assert_eq!(parse_locale_numeral("5,000"), Some(dec("5")));
        assert_eq!(parse_locale_numeral("1,000,000"), Some(dec("1000000")));
        assert_eq!(parse_locale_numeral("1,00,0"), None);
    }

    #[test]
    fn test_parse_locale_numeral_mixed() {
        assert_eq!(parse_locale_numeral("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_locale_numeral("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_locale_numeral("12.345.678,90"), Some(dec("12345678.90")));
    }

    #[test]
    fn test_magnitude_phrase() {
        let strategy = MagnitudePhraseStrategy;
        let value = |text: &str| strategy.extract(text).map(|m| m.value);

        assert_eq!(value("pagué diez mil pesos de alquiler"), Some(dec("10000")));
        assert_eq!(value("gasté 5 mil en el super"), Some(dec("5000")));
        assert_eq!(value("gasté 5mil"), Some(dec("5000")));
        assert_eq!(value("me pagaron 2,5 millones"), Some(dec("2500000")));
        assert_eq!(value("mil pesos de nafta"), Some(dec("1000")));
        assert_eq!(value("un millón"), Some(dec("1000000")));
        assert_eq!(value("cinco lucas"), Some(dec("5000")));
        assert_eq!(value("dos palos"), Some(dec("2000000")));
    }

    #[test]
    fn test_magnitude_phrase_digit_tail() {
        let strategy = MagnitudePhraseStrategy;
        let value = |text: &str| strategy.extract(text).map(|m| m.value);

        assert_eq!(value("5 mil quinientos"), Some(dec("5500")));
        assert_eq!(value("2 mil 500 de luz"), Some(dec("2500")));
        assert_eq!(value("2 mil 3000"), Some(dec("2000")));
    }

    #[test]
    fn test_magnitude_phrase_ignores_separate_quantities() {
        let strategy = MagnitudePhraseStrategy;
        let value = |text: &str| strategy.extract(text).map(|m| m.value);

        assert_eq!(value("gasté 5 mil 2 veces"), Some(dec("5000")));
        assert_eq!(value("3 mil 45 cuotas"), Some(dec("3000")));
        assert_eq!(value("2 millones 500"), Some(dec("2000000")));
        assert_eq!(value("2 mil 500 mil"), Some(dec("500000")));
    }

    #[test]
    fn test_magnitude_phrase_reads_spoken_compounds() {
        let strategy = MagnitudePhraseStrategy;
        let found = |text: &str| strategy.extract(text).map(|m| (m.value, m.source));

        assert_eq!(
            found("cobré dos mil setecientos cuarenta y dos"),
            Some((dec("2742"), "dos mil setecientos cuarenta y dos".to_string()))
        );
        assert_eq!(
            found("ciento cincuenta mil pesos"),
            Some((dec("150000"), "ciento cincuenta mil".to_string()))
        );
        assert_eq!(found("mil quinientos"), Some((dec("1500"), "mil quinientos".to_string())));
        assert_eq!(found("mil millones").map(|f| f.0), Some(dec("1000000000")));
    }

    #[test]
    fn test_spoken_compound_beats_stray_digits() {
        let extractor = AmountExtractor::new();
        let amount = |text: &str| {
            extractor
                .extract_with_strategy(text)
                .map(|(name, m)| (name, m.value))
        };

        assert_eq!(
            amount("cobré dos mil setecientos cuarenta y dos el día 15"),
            Some(("magnitude_phrase", dec("2742")))
        );
        assert_eq!(
            amount("ciento cincuenta mil pesos por 3 cervezas"),
            Some(("magnitude_phrase", dec("150000")))
        );
        assert_eq!(
            amount("gasté mil quinientos en 2 pizzas"),
            Some(("magnitude_phrase", dec("1500")))
        );
    }

    #[test]
    fn test_magnitude_phrase_takes_largest() {
        let found = MagnitudePhraseStrategy
            .extract("2 mil de comida y 3 mil de taxi")
            .unwrap();
        assert_eq!(found.value, dec("3000"));
        assert_eq!(found.source, "3 mil");
    }

    #[test]
    fn test_bare_numeral_takes_largest() {
        let found = BareNumeralStrategy
            .extract("compré 3 pizzas por 4.500 el 12")
            .unwrap();
        assert_eq!(found.value, dec("4500"));
        assert_eq!(found.source, "4.500");
        assert_eq!(found.position, Some((21, 26)));
    }

    #[test]
    fn test_chain_order() {
        let extractor = AmountExtractor::new();

        let (name, _) = extractor.extract_with_strategy("gasté 5 mil").unwrap();
        assert_eq!(name, "magnitude_phrase");

        let (name, _) = extractor.extract_with_strategy("gasté 5000").unwrap();
        assert_eq!(name, "bare_numeral");

        let (name, found) = extractor
            .extract_with_strategy("cobré trescientos veinte")
            .unwrap();
        assert_eq!(name, "spoken_number");
        assert_eq!(found.value, dec("320"));
    }

    #[test]
    fn test_extract_all() {
        let all = AmountExtractor::new().extract_all("gasté 5 mil y veinte");
        let values: Vec<Decimal> = all.into_iter().map(|m| m.value).collect();
        // The spoken pass does not see the digit quantifier in front of "mil".
        assert_eq!(values, vec![dec("5000"), dec("5"), dec("1020")]);
    }

    #[test]
    fn test_extract_amount() {
        assert_eq!(extract_amount("gasté 5000 en comida"), dec("5000"));
        assert_eq!(extract_amount("compré algo"), Decimal::ZERO);
        assert_eq!(extract_amount("veinte pesos"), dec("20"));
        assert_eq!(extract_amount("gasté 0 pesos"), Decimal::ZERO);
        assert_eq!(extract_amount("pagué 1.234,56"), dec("1234.56"));
    }

    #[test]
    fn test_custom_chain() {
        static DIGITS_ONLY: &[&dyn AmountStrategy] = &[&BareNumeralStrategy];
        let extractor = AmountExtractor::with_strategies(DIGITS_ONLY);
        assert!(extractor.extract("diez mil pesos").is_none());
        assert_eq!(extractor.extract("10 pesos").map(|m| m.value), Some(dec("10")));
    }
}
