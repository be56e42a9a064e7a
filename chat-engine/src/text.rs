//! Text normalization helpers
//!
//! All matching in the engine happens over normalized text: lower-cased,
//! Spanish diacritics stripped, punctuation treated as whitespace. The
//! stop-word set covers the politeness and article words visitors wrap
//! around an item name ("quiero una pizza por favor").

/// Words stripped from a query before catalog scoring
const STOP_WORDS: &[&str] = &[
    "quiero", "quisiera", "pedir", "ordenar", "dame", "traeme", "me", "gustaria", "un", "una",
    "unos", "unas", "el", "la", "los", "las", "de", "del", "por", "favor", "y", "con", "para",
];

/// Lower-case and strip Spanish diacritics
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            c => c,
        })
        .collect()
}

/// Normalized words of `text`, punctuation dropped
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Tokens of `text` with the stop-word set removed
pub fn query_tokens(text: &str) -> Vec<String> {
    tokens(text)
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

/// True if the normalized text contains any of the given keywords
pub fn contains_any(normalized: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| normalized.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Jamón Ibérico"), "jamon iberico");
        assert_eq!(normalize("MAÑANA"), "manana");
        assert_eq!(normalize("pingüino"), "pinguino");
    }

    #[test]
    fn test_tokens_drop_punctuation() {
        assert_eq!(
            tokens("sin cebolla, sin tomate!"),
            vec!["sin", "cebolla", "sin", "tomate"]
        );
    }

    #[test]
    fn test_query_tokens_strip_stop_words() {
        assert_eq!(
            query_tokens("quiero una pizza margherita por favor"),
            vec!["pizza", "margherita"]
        );
        assert_eq!(
            query_tokens("me gustaría la lasaña"),
            vec!["lasana"]
        );
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("ver el menu completo", &["menu", "carta"]));
        assert!(!contains_any("hola buenas", &["menu", "carta"]));
    }
}
