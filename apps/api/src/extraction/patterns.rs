//! Compiles a [`Vocabulary`] into ready-to-run regexes, once, when the
//! extractor is built.

use regex::{Regex, RegexBuilder};

use crate::extraction::vocabulary::{Vocabulary, VocabularyError};

/// A vocabulary keyword with its whole-word matcher.
#[derive(Debug, Clone)]
pub struct Keyword {
    /// The keyword as written in the vocabulary.
    pub text: String,
    /// Group 1 is the keyword as spelled in the document.
    pub matcher: Regex,
}

impl Keyword {
    /// First occurrence in `text`, spelled as found.
    pub fn find_in<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.matcher
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// A literal phrase located anywhere, case-insensitively (no word boundaries).
#[derive(Debug, Clone)]
pub struct Phrase {
    pub text: String,
    pub matcher: Regex,
}

impl Phrase {
    /// Byte offset of the first occurrence.
    pub fn position_in(&self, text: &str) -> Option<usize> {
        self.matcher.find(text).map(|m| m.start())
    }
}

#[derive(Debug, Clone)]
pub struct CompiledLabels {
    pub skills: Regex,
    pub languages: Regex,
    pub certifications: Regex,
    pub hobbies: Regex,
}

#[derive(Debug, Clone)]
pub struct CompiledVocabulary {
    pub name_patterns: Vec<Regex>,
    pub phone_patterns: Vec<Regex>,
    pub address_patterns: Vec<Regex>,
    pub location_keywords: Vec<Phrase>,
    /// Lowercased for substring checks against lowercased lines.
    pub summary_keywords: Vec<String>,
    pub job_keywords: Vec<String>,
    pub employer_patterns: Vec<Regex>,
    pub education_patterns: Vec<Regex>,
    pub technical_keywords: Vec<Keyword>,
    pub language_keywords: Vec<Keyword>,
    pub project_names: Vec<Phrase>,
    pub hobby_keywords: Vec<Keyword>,
    pub labels: CompiledLabels,
}

impl CompiledVocabulary {
    pub fn compile(vocab: &Vocabulary) -> Result<Self, VocabularyError> {
        Ok(Self {
            name_patterns: compile_all("name_patterns", &vocab.name_patterns, false)?,
            phone_patterns: compile_all("phone_patterns", &vocab.phone_patterns, true)?,
            address_patterns: compile_all("address_patterns", &vocab.address_patterns, true)?,
            location_keywords: phrases("location_keywords", &vocab.location_keywords)?,
            summary_keywords: lowercased(&vocab.summary_keywords),
            job_keywords: lowercased(&vocab.job_keywords),
            employer_patterns: compile_all("employer_patterns", &vocab.employer_patterns, true)?,
            education_patterns: compile_all(
                "education_patterns",
                &vocab.education_patterns,
                true,
            )?,
            technical_keywords: keywords("technical_keywords", &vocab.technical_keywords)?,
            language_keywords: keywords("language_keywords", &vocab.language_keywords)?,
            project_names: phrases("project_names", &vocab.project_names)?,
            hobby_keywords: keywords("hobby_keywords", &vocab.hobby_keywords)?,
            labels: CompiledLabels {
                skills: compile_one("section_labels.skills", &vocab.section_labels.skills, true)?,
                languages: compile_one(
                    "section_labels.languages",
                    &vocab.section_labels.languages,
                    true,
                )?,
                certifications: compile_one(
                    "section_labels.certifications",
                    &vocab.section_labels.certifications,
                    true,
                )?,
                hobbies: compile_one("section_labels.hobbies", &vocab.section_labels.hobbies, true)?,
            },
        })
    }
}

fn compile_one(
    category: &'static str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<Regex, VocabularyError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| VocabularyError::Pattern { category, source })
}

fn compile_all(
    category: &'static str,
    patterns: &[String],
    case_insensitive: bool,
) -> Result<Vec<Regex>, VocabularyError> {
    patterns
        .iter()
        .map(|p| compile_one(category, p, case_insensitive))
        .collect()
}

fn lowercased(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn phrases(category: &'static str, items: &[String]) -> Result<Vec<Phrase>, VocabularyError> {
    items
        .iter()
        .map(|text| {
            Ok(Phrase {
                text: text.clone(),
                matcher: compile_one(category, &regex::escape(text), true)?,
            })
        })
        .collect()
}

fn keywords(category: &'static str, items: &[String]) -> Result<Vec<Keyword>, VocabularyError> {
    items
        .iter()
        .map(|text| {
            Ok(Keyword {
                text: text.clone(),
                matcher: compile_one(category, &whole_word_pattern(text), true)?,
            })
        })
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only works next to a word character, so keywords such as `c++` or
/// `c#` get an explicit non-word (or text edge) guard on that side instead.
pub(crate) fn whole_word_pattern(keyword: &str) -> String {
    let lead = match keyword.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:^|\W)",
    };
    let trail = match keyword.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:\W|$)",
    };
    format!("{lead}({}){trail}", regex::escape(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(text: &str) -> Keyword {
        keywords("test", &[text.to_string()]).unwrap().remove(0)
    }

    #[test]
    fn test_builtin_vocabulary_compiles() {
        let compiled = CompiledVocabulary::compile(&Vocabulary::default()).unwrap();
        assert_eq!(compiled.name_patterns.len(), 4);
        assert_eq!(compiled.phone_patterns.len(), 6);
        assert_eq!(compiled.technical_keywords.len(), 33);
    }

    #[test]
    fn test_invalid_pattern_names_its_category() {
        let vocab = Vocabulary {
            phone_patterns: vec!["(unclosed".to_string()],
            ..Vocabulary::default()
        };
        match CompiledVocabulary::compile(&vocab) {
            Err(VocabularyError::Pattern { category, .. }) => assert_eq!(category, "phone_patterns"),
            other => panic!("expected pattern error, got {other:?}"),
        }
    }

    #[test]
    fn test_keyword_is_whole_word_and_case_insensitive() {
        let java = keyword("java");
        assert_eq!(java.find_in("Skills: JAVA and more"), Some("JAVA"));
        assert_eq!(java.find_in("I write javascript"), None);
    }

    #[test]
    fn test_keyword_with_symbol_suffix() {
        let cpp = keyword("c++");
        assert_eq!(cpp.find_in("Languages: C++, Rust"), Some("C++"));
        assert_eq!(cpp.find_in("c++"), Some("c++"));
        assert_eq!(cpp.find_in("abc++"), None);

        let node = keyword("node.js");
        assert_eq!(node.find_in("Node.js developer"), Some("Node.js"));
        assert_eq!(node.find_in("nodexjs"), None);
    }

    #[test]
    fn test_phrase_position_is_case_insensitive() {
        let phrase = phrases("test", &["LINA Project".to_string()]).unwrap().remove(0);
        assert_eq!(phrase.position_in("Built the lina project in 2022"), Some(10));
        assert_eq!(phrase.position_in("nothing here"), None);
    }
}
