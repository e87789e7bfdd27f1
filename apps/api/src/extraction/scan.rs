//! Small text-scanning helpers shared by the sub-extractors.

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]").unwrap());
static FOUR_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").unwrap());

/// Slice of `text` spanning up to `before` characters ahead of byte offset
/// `at` and up to `after` characters from it. `at` must be a char boundary.
pub fn char_window(text: &str, at: usize, before: usize, after: usize) -> &str {
    let start = text[..at]
        .char_indices()
        .rev()
        .take(before)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(at);
    let end = text[at..]
        .char_indices()
        .nth(after)
        .map(|(i, _)| at + i)
        .unwrap_or(text.len());
    &text[start..end]
}

/// Splits a labelled list ("Python, Java; SQL") into trimmed, non-empty items.
pub fn split_list(list: &str) -> Vec<String> {
    LIST_SEPARATOR_RE
        .split(list)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Items of the first list introduced by `label` (capture group 1).
pub fn labelled_list(label: &Regex, text: &str) -> Vec<String> {
    label
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| split_list(m.as_str()))
        .unwrap_or_default()
}

pub fn first_year(line: &str) -> Option<&str> {
    FOUR_DIGITS_RE.find(line).map(|m| m.as_str())
}

pub fn has_year(line: &str) -> bool {
    FOUR_DIGITS_RE.is_match(line)
}

/// Appends `item` unless an entry equal to it ignoring case is already there.
pub fn push_unique(items: &mut Vec<String>, item: &str) {
    let lowered = item.to_lowercase();
    if !items.iter().any(|existing| existing.to_lowercase() == lowered) {
        items.push(item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_window_clamps_at_edges() {
        let text = "abcdefghij";
        assert_eq!(char_window(text, 5, 2, 2), "defg");
        assert_eq!(char_window(text, 1, 50, 50), "abcdefghij");
        assert_eq!(char_window(text, 0, 3, 1), "a");
    }

    #[test]
    fn test_char_window_respects_multibyte_chars() {
        let text = "ééé Douala ééé";
        let at = text.find("Douala").unwrap();
        assert_eq!(char_window(text, at, 2, 8), "é Douala é");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" Python, Java ;SQL,, "),
            vec!["Python".to_string(), "Java".to_string(), "SQL".to_string()]
        );
        assert!(split_list(" , ; ").is_empty());
    }

    #[test]
    fn test_years() {
        assert_eq!(first_year("Sept 2019 - 2021"), Some("2019"));
        assert!(has_year("2020"));
        assert!(!has_year("Jan 21"));
    }

    #[test]
    fn test_push_unique_is_case_insensitive() {
        let mut items = vec!["Python".to_string()];
        push_unique(&mut items, "PYTHON");
        push_unique(&mut items, "Rust");
        assert_eq!(items, vec!["Python".to_string(), "Rust".to_string()]);
    }
}
