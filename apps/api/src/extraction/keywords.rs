//! List-shaped fields: skills, languages, certifications, projects, hobbies.

use crate::extraction::models::Project;
use crate::extraction::patterns::{CompiledVocabulary, Keyword};
use crate::extraction::scan::{char_window, labelled_list, push_unique};

pub const MAX_SKILLS: usize = 20;
const PROJECT_CONTEXT_CHARS: usize = 100;

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

/// Skills keep the spelling found in the document.
fn add_document_spellings(items: &mut Vec<String>, keywords: &[Keyword], text: &str) {
    for keyword in keywords {
        if let Some(found) = keyword.find_in(text) {
            push_unique(items, found);
        }
    }
}

/// Languages and hobbies are reported as the vocabulary spells them.
fn add_vocabulary_spellings(items: &mut Vec<String>, keywords: &[Keyword], text: &str) {
    for keyword in keywords {
        if keyword.find_in(text).is_some() {
            push_unique(items, &keyword.text);
        }
    }
}

/// Skill names may only hold word characters, whitespace and hyphens.
fn is_clean_skill(skill: &str) -> bool {
    skill.chars().count() > 1
        && skill
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace())
}

/// Labelled skills first, then vocabulary hits, deduplicated ignoring case and
/// capped at [`MAX_SKILLS`].
pub fn extract_skills(vocab: &CompiledVocabulary, text: &str) -> Option<Vec<String>> {
    let mut candidates = Vec::new();
    for skill in labelled_list(&vocab.labels.skills, text) {
        push_unique(&mut candidates, &skill);
    }
    add_document_spellings(&mut candidates, &vocab.technical_keywords, text);

    let skills: Vec<String> = candidates
        .into_iter()
        .filter(|s| is_clean_skill(s))
        .take(MAX_SKILLS)
        .collect();
    non_empty(skills)
}

/// Vocabulary hits first, then the labelled list.
pub fn extract_languages(vocab: &CompiledVocabulary, text: &str) -> Option<Vec<String>> {
    let mut languages = Vec::new();
    add_vocabulary_spellings(&mut languages, &vocab.language_keywords, text);
    for language in labelled_list(&vocab.labels.languages, text) {
        push_unique(&mut languages, &language);
    }
    non_empty(languages)
}

pub fn extract_certifications(vocab: &CompiledVocabulary, text: &str) -> Option<Vec<String>> {
    non_empty(labelled_list(&vocab.labels.certifications, text))
}

/// One entry per known project name present in the text, described by the
/// surrounding text. Technologies are not inferred.
pub fn extract_projects(vocab: &CompiledVocabulary, text: &str) -> Option<Vec<Project>> {
    let projects: Vec<Project> = vocab
        .project_names
        .iter()
        .filter_map(|project| {
            let at = project.position_in(text)?;
            let context =
                char_window(text, at, PROJECT_CONTEXT_CHARS, PROJECT_CONTEXT_CHARS).trim();
            (!context.is_empty()).then(|| Project {
                name: project.text.clone(),
                description: context.to_string(),
                technologies: Vec::new(),
            })
        })
        .collect();
    (!projects.is_empty()).then_some(projects)
}

/// Labelled hobbies first, then vocabulary hits.
pub fn extract_hobbies(vocab: &CompiledVocabulary, text: &str) -> Option<Vec<String>> {
    let mut hobbies = Vec::new();
    for hobby in labelled_list(&vocab.labels.hobbies, text) {
        push_unique(&mut hobbies, &hobby);
    }
    add_vocabulary_spellings(&mut hobbies, &vocab.hobby_keywords, text);
    non_empty(hobbies)
}
