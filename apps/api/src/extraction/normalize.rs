//! Text normalizer: turns raw PDF text into the canonical, line-oriented form
//! every sub-extractor reads.

use once_cell::sync::Lazy;
use regex::Regex;

static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());

/// Normalized document text. Only [`normalize`] can build one, so holding a
/// `NormalizedText` means the text has no control characters (other than
/// newline and interior tabs), no blank lines, and no padded lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, as reported in `extraction_metadata.text_length`.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

/// Strips 0x00-0x08, 0x0B-0x0C, 0x0E-0x1F and 0x7F. Tab, newline and
/// carriage return survive.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

/// Normalizes raw extracted text. Total: empty or whitespace-only input yields
/// an empty `NormalizedText`.
pub fn normalize(raw: &str) -> NormalizedText {
    if raw.is_empty() {
        return NormalizedText::default();
    }

    let text: String = raw.chars().filter(|c| !is_stripped_control(*c)).collect();
    let text = MULTI_SPACE_RE.replace_all(&text, " ");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");

    let joined = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    NormalizedText(joined.trim().to_string())
}
