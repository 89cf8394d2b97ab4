//! Description synthesis from the words left after removing known keywords.

use crate::models::transaction::{Category, Direction, MAX_DESCRIPTION_CHARS};

use super::keywords::is_description_stopword;
use super::patterns::{EDGE_PUNCTUATION, NUMERIC_TOKEN};

const ELLIPSIS: &str = "...";

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut a description down to [`MAX_DESCRIPTION_CHARS`], ending it with "..." when cut.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description.to_string();
    }
    let kept: String = description
        .chars()
        .take(MAX_DESCRIPTION_CHARS - ELLIPSIS.len())
        .collect();
    format!("{}{}", kept, ELLIPSIS)
}

/// Fallback label when no descriptive word is left.
pub fn fallback_description(direction: Direction, category: Category) -> String {
    match category {
        Category::Other => direction.label().to_string(),
        _ => category.label().to_string(),
    }
}

/// Build a label from a lower-cased transcript.
///
/// Direction keywords, currency nouns, connectives, small number words and
/// numerals (glued ones such as "5mil" included) are dropped. The first
/// remaining word and every word longer than three characters are
/// capitalized.
pub fn synthesize_description(text: &str, direction: Direction, category: Category) -> String {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| w.trim_matches(EDGE_PUNCTUATION))
        .filter(|w| !w.is_empty())
        .filter(|w| !is_description_stopword(w))
        .filter(|w| !NUMERIC_TOKEN.is_match(w))
        .enumerate()
        .map(|(i, w)| {
            if i == 0 || w.chars().count() > 3 {
                capitalize(w)
            } else {
                w.to_string()
            }
        })
        .collect();

    let description = if words.is_empty() {
        fallback_description(direction, category)
    } else {
        words.join(" ")
    };

    truncate_description(&description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keywords_removed() {
        assert_eq!(
            synthesize_description("gasté 5000 en comida", Direction::Outflow, Category::Food),
            "Comida"
        );
        assert_eq!(
            synthesize_description("ingresé 3000 por mi trabajo", Direction::Inflow, Category::Salary),
            "Mi Trabajo"
        );
    }

    #[test]
    fn test_capitalization() {
        assert_eq!(
            synthesize_description("compré pan y leche en el súper", Direction::Outflow, Category::Other),
            "Pan y Leche el Súper"
        );
        assert_eq!(
            synthesize_description("ómnibus a la facultad", Direction::Outflow, Category::Transport),
            "Ómnibus a la Facultad"
        );
    }

    #[test]
    fn test_punctuation_and_numerals() {
        assert_eq!(
            synthesize_description("gasté $1.500,50 en nafta.", Direction::Outflow, Category::Transport),
            "Nafta"
        );
    }

    #[test]
    fn test_glued_quantities_dropped() {
        assert_eq!(
            synthesize_description("gasté 5mil en nafta", Direction::Outflow, Category::Transport),
            "Nafta"
        );
        assert_eq!(
            synthesize_description("gasté 5mil", Direction::Outflow, Category::Other),
            "Gasto"
        );
        assert_eq!(
            synthesize_description("cobré 2,5k de aguinaldo", Direction::Inflow, Category::Salary),
            "Aguinaldo"
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(
            synthesize_description("pagué diez mil pesos de alquiler", Direction::Outflow, Category::Home),
            "Hogar"
        );
        assert_eq!(
            synthesize_description("gasté 200", Direction::Outflow, Category::Other),
            "Gasto"
        );
        assert_eq!(
            synthesize_description("cobré 200", Direction::Inflow, Category::Other),
            "Ingreso"
        );
        assert_eq!(synthesize_description("", Direction::Outflow, Category::Other), "Gasto");
    }

    #[test]
    fn test_truncation() {
        let text = "cumpleaños sorpresa para la abuela con torta velas globos guirnaldas";
        let description = synthesize_description(text, Direction::Outflow, Category::Other);

        assert_eq!(description.chars().count(), MAX_DESCRIPTION_CHARS);
        assert!(description.ends_with("..."));
        assert!(description.starts_with("Cumpleaños Sorpresa la Abuela"));
    }

    #[test]
    fn test_truncate_exact_length() {
        let exact = "a".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(truncate_description(&exact), exact);

        let longer = "ñ".repeat(MAX_DESCRIPTION_CHARS + 1);
        let cut = truncate_description(&longer);
        assert_eq!(cut.chars().count(), MAX_DESCRIPTION_CHARS);
        assert_eq!(cut, format!("{}...", "ñ".repeat(47)));
    }
}
