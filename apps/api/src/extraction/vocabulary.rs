//! Keyword and pattern vocabularies driving the sub-extractors.
//!
//! The built-in tables were tuned on French/English bilingual CVs from
//! Cameroon. They are plain data: a JSON file can replace any category at
//! startup (see [`Vocabulary::from_json_file`]) without touching the
//! extraction code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vocabulary file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pattern in '{category}': {source}")]
    Pattern {
        category: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Label regexes introducing comma/semicolon separated lists. Capture group 1
/// holds the list text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLabels {
    pub skills: String,
    pub languages: String,
    pub certifications: String,
    pub hobbies: String,
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self {
            skills: r"(?:Compétences?|Skills?|Technologies?|Outils?|Tools?)[:\s]*([^.\n]+)"
                .to_string(),
            languages: r"(?:Langues?|Languages?)[:\s]*([^.\n]+)".to_string(),
            certifications: r"(?:Certifications?|Certificats?|Certificates?)[:\s]*([^.\n]+)"
                .to_string(),
            hobbies: r"(?:Hobbies?|Centres? d'intérêt|Interests?)[:\s]*([^.\n]+)".to_string(),
        }
    }
}

/// Every curated list the extractor consults, one named field per category.
///
/// Order matters: pattern lists are tried first to last and the first
/// acceptable match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Case-sensitive. Capture group 1 is the candidate name.
    pub name_patterns: Vec<String>,
    /// Case-insensitive. Capture group 1 is the number.
    pub phone_patterns: Vec<String>,
    /// Case-insensitive. Capture group 1 if present, else the whole match.
    pub address_patterns: Vec<String>,
    pub location_keywords: Vec<String>,
    pub summary_keywords: Vec<String>,
    /// Substrings (lowercase) marking the start of a work experience entry.
    pub job_keywords: Vec<String>,
    /// Case-insensitive regexes for known employers, also marking an entry start.
    pub employer_patterns: Vec<String>,
    /// Case-insensitive regexes marking the start of an education entry.
    pub education_patterns: Vec<String>,
    pub technical_keywords: Vec<String>,
    pub language_keywords: Vec<String>,
    pub project_names: Vec<String>,
    pub hobby_keywords: Vec<String>,
    pub section_labels: SectionLabels,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            name_patterns: owned(&[
                r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})",
                r"([A-Z][A-Z\s]+[A-Z])",
                r"(?:My name is|Je m'appelle|I am|Name)[:\s]*([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})",
                r"([A-Z][a-z]+\s+[A-Z][a-z]+\s+[A-Z][a-z]+)",
            ]),
            phone_patterns: owned(&[
                r"(\+237\s*[0-9]{8,9})",
                r"(237\s*[0-9]{8,9})",
                r"(\+33\s*[0-9]{9,10})",
                r"(0[0-9]{9})",
                r"Phone[:\s]*([0-9+\s\-]+)",
                r"Téléphone[:\s]*([0-9+\s\-]+)",
            ]),
            address_patterns: owned(&[
                r"(?:Adresses?|Address|Adresse)[:\s]*([^.\n]+)",
                r"(?:Yassa|Douala|Littoral)[^.\n]*",
                r"(?:Ville|City)[:\s]*([^.\n]+)",
            ]),
            location_keywords: owned(&["Yassa", "Douala", "Littoral", "Cameroun", "Cameroon"]),
            summary_keywords: owned(&[
                "résumé",
                "summary",
                "profil",
                "profile",
                "objectif",
                "objective",
                "ambitious",
                "determined",
                "hardworking",
            ]),
            job_keywords: owned(&[
                "intern",
                "stagiaire",
                "développeur",
                "developer",
                "mobile developer",
            ]),
            employer_patterns: owned(&[r"\b(?:COM\.INFO|Devsec|PRODITECH|ENSPD)\b"]),
            education_patterns: owned(&[
                r"(?:National Higher Polytechnic School of Douala)[^.\n]*",
                r"(?:LYCEE DE LA CITE DES PALMIERS)[^.\n]*",
                r"(?:Baccalaureat|Bachelor|Master|PhD)[^.\n]*",
            ]),
            technical_keywords: owned(&[
                "python",
                "java",
                "javascript",
                "react",
                "angular",
                "vue",
                "node.js",
                "sql",
                "mongodb",
                "docker",
                "kubernetes",
                "aws",
                "azure",
                "git",
                "html",
                "css",
                "typescript",
                "php",
                "c#",
                "c++",
                "go",
                "rust",
                "laravel",
                "django",
                "flask",
                "unity",
                "figma",
                "adobe xd",
                "illustrator",
                "linux",
                "wpf",
                "winform",
                "huawei cloud",
            ]),
            language_keywords: owned(&["French", "English", "Native", "Fluent"]),
            project_names: owned(&[
                "LINA Project",
                "AFRISOLUTION",
                "Devsec website",
                "Camtel Bluetech Challenge",
            ]),
            hobby_keywords: owned(&["Sing", "piano", "Music", "football", "reading", "video games"]),
            section_labels: SectionLabels::default(),
        }
    }
}

impl Vocabulary {
    /// Loads a vocabulary override. Categories missing from the file keep
    /// their built-in lists.
    pub fn from_json_file(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| VocabularyError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
