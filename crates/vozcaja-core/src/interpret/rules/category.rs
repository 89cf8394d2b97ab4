//! Keyword-weighted category scoring.

use crate::models::transaction::Category;

use super::keywords::CATEGORY_KEYWORDS;

/// Score of one category for a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: Category,
    /// Sum of the lengths, in characters, of every matching keyword.
    pub score: usize,
    /// Keywords found in the transcript.
    pub matched: Vec<&'static str>,
}

/// Score every category, in scoring order.
pub fn score_categories(text: &str) -> Vec<CategoryScore> {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let matched: Vec<&'static str> = keywords
                .iter()
                .copied()
                .filter(|k| text.contains(k))
                .collect();
            CategoryScore {
                category: *category,
                score: matched.iter().map(|k| k.chars().count()).sum(),
                matched,
            }
        })
        .collect()
}

/// Classify a lower-cased transcript.
///
/// Keywords match as plain substrings and longer keywords weigh more. The
/// strictly highest score wins; on a tie the category listed first keeps
/// the lead. No match at all gives [`Category::Other`].
pub fn classify_category(text: &str) -> Category {
    let mut best = Category::Other;
    let mut best_score = 0;

    for entry in score_categories(text) {
        if entry.score > best_score {
            best = entry.category;
            best_score = entry.score;
        }
    }

    best
}
