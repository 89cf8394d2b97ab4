//! Spanish spoken-number words and the compound number parser.

use rust_decimal::Decimal;

use super::{tokenize, ExtractionMatch, Token};

/// Confidence assigned to amounts read from spoken words.
const SPOKEN_CONFIDENCE: f32 = 0.7;

/// Additive number words: units, teens, tens, veinti- compounds and hundreds.
pub const NUMBER_WORDS: &[(&str, u32)] = &[
    ("cero", 0),
    ("un", 1),
    ("uno", 1),
    ("una", 1),
    ("dos", 2),
    ("tres", 3),
    ("cuatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("siete", 7),
    ("ocho", 8),
    ("nueve", 9),
    ("diez", 10),
    ("once", 11),
    ("doce", 12),
    ("trece", 13),
    ("catorce", 14),
    ("quince", 15),
    ("dieciséis", 16),
    ("dieciseis", 16),
    ("diecisiete", 17),
    ("dieciocho", 18),
    ("diecinueve", 19),
    ("veinte", 20),
    ("veintiuno", 21),
    ("veintiún", 21),
    ("veintiun", 21),
    ("veintiuna", 21),
    ("veintidós", 22),
    ("veintidos", 22),
    ("veintitrés", 23),
    ("veintitres", 23),
    ("veinticuatro", 24),
    ("veinticinco", 25),
    ("veintiséis", 26),
    ("veintiseis", 26),
    ("veintisiete", 27),
    ("veintiocho", 28),
    ("veintinueve", 29),
    ("treinta", 30),
    ("cuarenta", 40),
    ("cincuenta", 50),
    ("sesenta", 60),
    ("setenta", 70),
    ("ochenta", 80),
    ("noventa", 90),
    ("cien", 100),
    ("ciento", 100),
    ("doscientos", 200),
    ("doscientas", 200),
    ("trescientos", 300),
    ("trescientas", 300),
    ("cuatrocientos", 400),
    ("cuatrocientas", 400),
    ("quinientos", 500),
    ("quinientas", 500),
    ("seiscientos", 600),
    ("seiscientas", 600),
    ("setecientos", 700),
    ("setecientas", 700),
    ("ochocientos", 800),
    ("ochocientas", 800),
    ("novecientos", 900),
    ("novecientas", 900),
];

/// Words multiplying by one thousand, including slang ("cinco lucas").
pub const THOUSAND_WORDS: &[&str] = &["mil", "miles", "luca", "lucas"];

/// Words multiplying by one million, including slang ("dos palos").
pub const MILLION_WORDS: &[&str] = &["millón", "millon", "millones", "palo", "palos"];

/// Number words that usually act as an indefinite article.
pub const ARTICLE_WORDS: &[&str] = &["un", "una", "uno"];

/// Connective between tens and units ("cuarenta y dos").
pub const AND_WORD: &str = "y";

/// Role of a word inside a spoken number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberWord {
    /// Added to the current block.
    Value(u32),
    /// Multiplies the current block by 1 000.
    Thousand,
    /// Multiplies everything read so far by 1 000 000.
    Million,
    /// Joins two value words.
    And,
}

impl NumberWord {
    /// Multiplier of a magnitude word.
    pub fn magnitude(&self) -> Option<Decimal> {
        match self {
            NumberWord::Thousand => Some(Decimal::from(1_000)),
            NumberWord::Million => Some(Decimal::from(1_000_000)),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, NumberWord::Value(_))
    }
}

/// Look up a lower-case word.
pub fn lookup_number_word(word: &str) -> Option<NumberWord> {
    if word == AND_WORD {
        return Some(NumberWord::And);
    }
    if THOUSAND_WORDS.contains(&word) {
        return Some(NumberWord::Thousand);
    }
    if MILLION_WORDS.contains(&word) {
        return Some(NumberWord::Million);
    }
    NUMBER_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, value)| NumberWord::Value(*value))
}

/// Running state of one spoken number.
#[derive(Debug, Default)]
struct SpokenBlock {
    total: Decimal,
    current: Decimal,
    span: Option<(usize, usize)>,
    significant: bool,
    overflowed: bool,
}

impl SpokenBlock {
    fn is_open(&self) -> bool {
        self.span.is_some()
    }

    fn push(&mut self, token: &Token<'_>, word: NumberWord) {
        self.span = Some(match self.span {
            Some((start, _)) => (start, token.end),
            None => (token.start, token.end),
        });

        match word {
            NumberWord::Value(value) => {
                if !ARTICLE_WORDS.contains(&token.text) {
                    self.significant = true;
                }
                self.current += Decimal::from(value);
            }
            NumberWord::Thousand | NumberWord::Million => {
                self.significant = true;
                let multiplier = word.magnitude().unwrap_or(Decimal::ONE);
                let next = if word == NumberWord::Thousand {
                    let block = if self.current.is_zero() { Decimal::ONE } else { self.current };
                    block
                        .checked_mul(multiplier)
                        .and_then(|b| self.total.checked_add(b))
                } else {
                    self.total
                        .checked_add(self.current)
                        .map(|b| if b.is_zero() { Decimal::ONE } else { b })
                        .and_then(|b| b.checked_mul(multiplier))
                };
                match next {
                    Some(total) => self.total = total,
                    None => self.overflowed = true,
                }
                self.current = Decimal::ZERO;
            }
            NumberWord::And => {}
        }
    }

    /// Value and byte span, if the block names a usable number.
    fn finish(self) -> Option<(Decimal, usize, usize)> {
        let (start, end) = self.span?;
        if self.overflowed || !self.significant {
            return None;
        }
        let value = self.total.checked_add(self.current)?;
        if value.is_zero() {
            return None;
        }
        Some((value, start, end))
    }
}

/// Every run of spoken number words, in order of appearance.
///
/// A run ends at the first token that is not a number word. "y" only
/// continues a run when another value word follows it. Runs made only of
/// "un"/"una"/"uno" are articles, not amounts.
pub fn spoken_runs(tokens: &[Token<'_>]) -> Vec<(Decimal, usize, usize)> {
    let mut runs = Vec::new();
    let mut block = SpokenBlock::default();

    for (i, token) in tokens.iter().enumerate() {
        match lookup_number_word(token.text) {
            Some(NumberWord::And)
                if block.is_open()
                    && tokens
                        .get(i + 1)
                        .and_then(|t| lookup_number_word(t.text))
                        .is_some_and(|w| w.is_value()) => {}
            Some(word) if word != NumberWord::And => block.push(token, word),
            _ => {
                if let Some(run) = std::mem::take(&mut block).finish() {
                    runs.push(run);
                }
            }
        }
    }

    if let Some(run) = block.finish() {
        runs.push(run);
    }

    runs
}

/// Parse every spoken number in the text.
pub fn parse_spoken_numbers(text: &str) -> Vec<ExtractionMatch<Decimal>> {
    spoken_runs(&tokenize(text))
        .into_iter()
        .map(|(value, start, end)| {
            ExtractionMatch::new(value, SPOKEN_CONFIDENCE, &text[start..end])
                .with_position(start, end)
        })
        .collect()
}

/// Value of the spoken number starting at the first token, if any.
pub fn leading_spoken_value(tokens: &[Token<'_>]) -> Option<(Decimal, usize)> {
    let first = tokens.first()?;
    spoken_runs(tokens)
        .into_iter()
        .next()
        .filter(|(_, start, _)| *start == first.start)
        .map(|(value, _, end)| (value, end))
}
