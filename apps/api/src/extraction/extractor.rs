//! `CvExtractor` runs every sub-extractor over one normalized document and
//! assembles the structured result.
//!
//! Sub-extractors are independent pure functions returning `Option<T>`;
//! `None` means "nothing found" and only empties that one field. No field can
//! fail the whole extraction.

use tracing::{debug, info, Span};

use crate::extraction::confidence::compute_confidence_score;
use crate::extraction::entries::{extract_education, extract_work_experience};
use crate::extraction::identity::{
    extract_address, extract_contact_info, extract_personal_info, extract_professional_summary,
};
use crate::extraction::keywords::{
    extract_certifications, extract_hobbies, extract_languages, extract_projects, extract_skills,
};
use crate::extraction::models::{ExtractionMetadata, ExtractionResult, EXTRACTION_METHOD};
use crate::extraction::normalize::{normalize, NormalizedText};
use crate::extraction::patterns::CompiledVocabulary;
use crate::extraction::vocabulary::{Vocabulary, VocabularyError};

/// Heuristic CV field extractor. Stateless between calls; share it behind an
/// `Arc` and call it concurrently.
#[derive(Debug, Clone)]
pub struct CvExtractor {
    vocab: CompiledVocabulary,
    span: Span,
}

impl CvExtractor {
    /// Compiles the vocabulary. Events are emitted inside `span`, which the
    /// caller supplies.
    pub fn new(vocabulary: &Vocabulary, span: Span) -> Result<Self, VocabularyError> {
        Ok(Self {
            vocab: CompiledVocabulary::compile(vocabulary)?,
            span,
        })
    }

    /// Normalizes `raw` and extracts from it.
    pub fn extract_raw(&self, raw: &str) -> ExtractionResult {
        self.extract(&normalize(raw))
    }

    pub fn extract(&self, text: &NormalizedText) -> ExtractionResult {
        let _entered = self.span.enter();
        let vocab = &self.vocab;
        let text_str = text.as_str();

        let result = ExtractionResult {
            personal_info: field("personal_info", extract_personal_info(vocab, text_str)),
            contact_info: field("contact_info", extract_contact_info(vocab, text_str)),
            address: field("address", extract_address(vocab, text_str)),
            professional_summary: field(
                "professional_summary",
                extract_professional_summary(vocab, text_str),
            ),
            work_experience: field("work_experience", extract_work_experience(vocab, text_str)),
            education: field("education", extract_education(vocab, text_str)),
            skills: field("skills", extract_skills(vocab, text_str)),
            languages: field("languages", extract_languages(vocab, text_str)),
            certifications: field("certifications", extract_certifications(vocab, text_str)),
            projects: field("projects", extract_projects(vocab, text_str)),
            hobbies: field("hobbies", extract_hobbies(vocab, text_str)),
            extraction_metadata: ExtractionMetadata {
                text_length: text.char_len(),
                extraction_method: EXTRACTION_METHOD.to_string(),
                confidence_score: compute_confidence_score(text_str),
            },
        };

        info!(
            text_length = result.extraction_metadata.text_length,
            confidence = result.extraction_metadata.confidence_score,
            experience = result.work_experience.len(),
            education = result.education.len(),
            skills = result.skills.len(),
            "CV extraction complete"
        );
        result
    }
}

fn field<T: Default>(name: &'static str, found: Option<T>) -> T {
    found.unwrap_or_else(|| {
        debug!(field = name, "no match, leaving field empty");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> CvExtractor {
        CvExtractor::new(&Vocabulary::default(), Span::none()).unwrap()
    }

    const SAMPLE_CV: &str = "\
NGONO Marie Claire
Yassa, Douala - Littoral
marie.ngono@example.com | +237 677 88 99 00 | linkedin.com/in/marie-ngono | github.com/mngono

PROFILE
Ambitious and determined software engineer with a passion for mobile apps.
Three years building Flutter and Laravel products for African startups.

EXPERIENCE
Mobile Developer Intern
Devsec Africa
June 2022 - September 2022
Shipped the Devsec website redesign used by 10k visitors a month.

EDUCATION
National Higher Polytechnic School of Douala
Computer Engineering
2019 - 2024

Skills: Python, Flutter; Laravel, Git
Languages: French, English
Certifications: Huawei HCIA-Cloud
Hobbies: football, reading
Projects: LINA Project - school management platform";

    #[test]
    fn test_jean_dupont_example() {
        let text = "Jean Dupont\njean.dupont@example.com\n+237699112233\nSkills: Python, Java, SQL";
        let result = extractor().extract_raw(text);
        assert_eq!(result.personal_info.full_name.as_deref(), Some("Jean Dupont"));
        assert_eq!(
            result.contact_info.email.as_deref(),
            Some("jean.dupont@example.com")
        );
        assert!(result.contact_info.phone.as_deref().unwrap().starts_with("+237"));
        for skill in ["Python", "Java", "SQL"] {
            assert!(result.skills.iter().any(|s| s == skill), "missing {skill}");
        }
    }

    #[test]
    fn test_empty_input_gives_empty_result() {
        let result = extractor().extract_raw("");
        let expected = ExtractionResult::default();
        assert_eq!(result, expected);
        assert_eq!(result.extraction_metadata.text_length, 0);
        assert_eq!(result.extraction_metadata.confidence_score, 0.0);
    }

    #[test]
    fn test_education_year_example() {
        let result = extractor().extract_raw("Education: Bachelor of Science, 2019");
        assert!(result.education.iter().any(|e| e.year.contains("2019")));
    }

    #[test]
    fn test_duplicate_skill_spellings() {
        let result = extractor().extract_raw("Python scripting\nLater PYTHON automation");
        let count = result
            .skills
            .iter()
            .filter(|s| s.eq_ignore_ascii_case("python"))
            .count();
        assert_eq!(count, 1);
        assert!(result.skills.contains(&"Python".to_string()));
    }

    #[test]
    fn test_full_sample() {
        let result = extractor().extract_raw(SAMPLE_CV);

        assert_eq!(result.contact_info.email.as_deref(), Some("marie.ngono@example.com"));
        assert_eq!(result.contact_info.github.as_deref(), Some("github.com/mngono"));
        assert_eq!(result.address, "Yassa, Douala - Littoral");
        assert!(result.professional_summary.starts_with("Ambitious and determined"));

        let titles: Vec<_> = result.work_experience.iter().map(|e| e.title.as_str()).collect();
        assert!(titles.contains(&"Mobile Developer Intern"));

        let school = result
            .education
            .iter()
            .find(|e| e.degree == "National Higher Polytechnic School of Douala")
            .unwrap();
        assert_eq!(school.institution, "Computer Engineering");
        assert_eq!(school.year, "2019 - 2024");

        assert!(result.skills.contains(&"Flutter".to_string()));
        assert!(result.languages.contains(&"French".to_string()));
        assert_eq!(result.certifications, vec!["Huawei HCIA-Cloud"]);
        assert!(result.hobbies.contains(&"football".to_string()));
        assert!(result.projects.iter().any(|p| p.name == "LINA Project"));
        assert!(result.projects.iter().any(|p| p.name == "Devsec website"));

        let meta = &result.extraction_metadata;
        assert_eq!(meta.extraction_method, "improved_regex_based");
        assert!(meta.confidence_score > 0.5 && meta.confidence_score <= 1.0);
    }

    #[test]
    fn test_removing_emails_leaves_other_fields_alone() {
        let with_email = extractor().extract_raw(SAMPLE_CV);
        let without_email =
            extractor().extract_raw(&SAMPLE_CV.replace("marie.ngono@example.com", ""));

        assert!(without_email.contact_info.email.is_none());
        assert_eq!(with_email.personal_info, without_email.personal_info);
        assert_eq!(with_email.work_experience, without_email.work_experience);
        assert_eq!(with_email.education, without_email.education);
        assert_eq!(with_email.skills, without_email.skills);
        assert_eq!(with_email.languages, without_email.languages);
        assert_eq!(with_email.hobbies, without_email.hobbies);
        assert_eq!(with_email.contact_info.phone, without_email.contact_info.phone);
    }

    #[test]
    fn test_garbage_input_is_total() {
        let mut garbage = String::new();
        for i in 0..5000u32 {
            garbage.push(char::from_u32(i % 0x2FF).unwrap_or('?'));
        }
        garbage.push_str(&"Skills: ".repeat(50));
        let result = extractor().extract_raw(&garbage);
        assert!(result.skills.len() <= 20);
        let score = result.extraction_metadata.confidence_score;
        assert!((0.0..=1.0).contains(&score));
        for list in [&result.skills, &result.languages, &result.hobbies] {
            let mut seen = std::collections::HashSet::new();
            assert!(list.iter().all(|item| seen.insert(item.clone())));
        }
    }
}
