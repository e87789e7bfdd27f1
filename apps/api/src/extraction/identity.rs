//! Header-style fields: name, contact details, address and the professional
//! summary. Each function returns `None` when nothing usable is found.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::models::{ContactInfo, PersonalInfo};
use crate::extraction::patterns::CompiledVocabulary;
use crate::extraction::scan::char_window;

pub(crate) static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap()
});
static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?linkedin\.com/in/[\w\-%]+").unwrap()
});
static GITHUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:https?://)?(?:www\.)?github\.com/[\w\-]+").unwrap());
static WEBSITE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://(?:www\.)?[^\s<>"]+|www\.[^\s<>"]+"#).unwrap());

const NAME_HEADER_LINES: usize = 5;
const ADDRESS_CONTEXT_CHARS: usize = 50;
const SUMMARY_LOOKAHEAD: usize = 5;
const SUMMARY_MAX_LINES: usize = 3;

fn group_or_whole<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str())
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// Tries each name pattern in order; only the first match of each pattern is
/// considered. Falls back to the first plausible header line.
pub fn extract_personal_info(vocab: &CompiledVocabulary, text: &str) -> Option<PersonalInfo> {
    let from_patterns = vocab.name_patterns.iter().find_map(|re| {
        let name = group_or_whole(re, text)?.trim();
        (name.chars().count() > 3 && !has_digit(name)).then_some(name)
    });

    let full_name = from_patterns.or_else(|| {
        text.split('\n').take(NAME_HEADER_LINES).map(str::trim).find(|line| {
            line.chars().count() > 5 && !has_digit(line) && !line.contains('@') && !line.contains('+')
        })
    })?;

    Some(PersonalInfo {
        full_name: Some(full_name.to_string()),
    })
}

/// First email, phone, LinkedIn, GitHub and website found. The fields do not
/// influence each other.
pub fn extract_contact_info(vocab: &CompiledVocabulary, text: &str) -> Option<ContactInfo> {
    let phone = vocab.phone_patterns.iter().find_map(|re| {
        let phone = group_or_whole(re, text)?.trim();
        (phone.chars().count() >= 8).then(|| phone.to_string())
    });

    let contact = ContactInfo {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone,
        linkedin: LINKEDIN_RE.find(text).map(|m| m.as_str().to_string()),
        github: GITHUB_RE.find(text).map(|m| m.as_str().to_string()),
        website: WEBSITE_RE.find(text).map(|m| m.as_str().to_string()),
    };

    (!contact.is_empty()).then_some(contact)
}

/// Labelled address first, then known place patterns, then a window of text
/// around the first known location keyword.
pub fn extract_address(vocab: &CompiledVocabulary, text: &str) -> Option<String> {
    let labelled = vocab.address_patterns.iter().find_map(|re| {
        let address = group_or_whole(re, text)?.trim();
        (address.chars().count() > 5).then(|| address.to_string())
    });
    if labelled.is_some() {
        return labelled;
    }

    vocab.location_keywords.iter().find_map(|keyword| {
        let at = keyword.position_in(text)?;
        let context = char_window(text, at, ADDRESS_CONTEXT_CHARS, ADDRESS_CONTEXT_CHARS).trim();
        (!context.is_empty()).then(|| context.to_string())
    })
}

/// The up-to-three substantial lines following the first line that mentions a
/// summary keyword.
pub fn extract_professional_summary(vocab: &CompiledVocabulary, text: &str) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        let lowered = line.to_lowercase();
        if !vocab.summary_keywords.iter().any(|k| lowered.contains(k.as_str())) {
            continue;
        }

        let summary: Vec<&str> = lines
            .iter()
            .skip(i + 1)
            .take(SUMMARY_LOOKAHEAD)
            .map(|l| l.trim())
            .filter(|l| l.chars().count() > 10)
            .take(SUMMARY_MAX_LINES)
            .collect();

        if !summary.is_empty() {
            return Some(summary.join(" "));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::vocabulary::Vocabulary;

    fn vocab() -> CompiledVocabulary {
        CompiledVocabulary::compile(&Vocabulary::default()).unwrap()
    }

    fn name_of(text: &str) -> Option<String> {
        extract_personal_info(&vocab(), text).and_then(|p| p.full_name)
    }

    #[test]
    fn test_capitalized_name_wins() {
        let text = "Jean Dupont\njean.dupont@example.com\n+237699112233";
        assert_eq!(name_of(text).as_deref(), Some("Jean Dupont"));
    }

    #[test]
    fn test_all_caps_name() {
        assert_eq!(name_of("NGONO MARIE\n2020").as_deref(), Some("NGONO MARIE"));
    }

    #[test]
    fn test_capitalized_name_beats_earlier_all_caps_line() {
        let text = "CURRICULUM VITAE\nJean Dupont\njean@example.com";
        assert_eq!(name_of(text).as_deref(), Some("Jean Dupont"));
        assert_eq!(name_of("NGONO MARIE\nPaul Biya").as_deref(), Some("Paul Biya"));
    }

    #[test]
    fn test_self_identification_name() {
        let only_intro = Vocabulary {
            name_patterns: vec![Vocabulary::default().name_patterns[2].clone()],
            ..Vocabulary::default()
        };
        let vocab = CompiledVocabulary::compile(&only_intro).unwrap();
        let text = "about me\nMy name is Paul Biya Ndi and I build apps";
        let name = extract_personal_info(&vocab, text).and_then(|p| p.full_name);
        assert_eq!(name.as_deref(), Some("Paul Biya Ndi"));

        let text = "bonjour, Je m'appelle Awa Mbarga";
        let name = extract_personal_info(&vocab, text).and_then(|p| p.full_name);
        assert_eq!(name.as_deref(), Some("Awa Mbarga"));
    }

    #[test]
    fn test_header_line_fallback() {
        // No capitalized word pair and no run of capitals: the first plain line is used.
        assert_eq!(name_of("42 rue x\njean-paul dupont\n").as_deref(), Some("jean-paul dupont"));
    }

    #[test]
    fn test_fallback_skips_contact_lines() {
        assert_eq!(name_of("jean@ex.com\n+237 6991\nabc"), None);
    }

    #[test]
    fn test_no_name_in_empty_text() {
        assert_eq!(name_of(""), None);
    }

    #[test]
    fn test_contact_fields() {
        let text = "Email: jean.dupont@example.com\nTel: +237 699112233\n\
                    linkedin.com/in/jean-dupont\nhttps://github.com/jdupont\nwww.jdupont.dev";
        let contact = extract_contact_info(&vocab(), text).unwrap();
        assert_eq!(contact.email.as_deref(), Some("jean.dupont@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("+237 699112233"));
        assert_eq!(contact.linkedin.as_deref(), Some("linkedin.com/in/jean-dupont"));
        assert_eq!(contact.github.as_deref(), Some("https://github.com/jdupont"));
        assert_eq!(contact.website.as_deref(), Some("https://github.com/jdupont"));
    }

    #[test]
    fn test_french_phone_and_labelled_phone() {
        let contact = extract_contact_info(&vocab(), "Appelez le 0612345678").unwrap();
        assert_eq!(contact.phone.as_deref(), Some("0612345678"));

        let contact = extract_contact_info(&vocab(), "Phone: 44 20 7946 09").unwrap();
        assert_eq!(contact.phone.as_deref(), Some("44 20 7946 09"));
    }

    #[test]
    fn test_french_international_phone() {
        let contact = extract_contact_info(&vocab(), "Tel +33 612345678 (France)").unwrap();
        assert_eq!(contact.phone.as_deref(), Some("+33 612345678"));
    }

    #[test]
    fn test_telephone_label() {
        let contact = extract_contact_info(&vocab(), "Téléphone: 6 99 11 22 33").unwrap();
        assert_eq!(contact.phone.as_deref(), Some("6 99 11 22 33"));

        let only_label = Vocabulary {
            phone_patterns: vec![r"Téléphone[:\s]*([0-9+\s\-]+)".to_string()],
            ..Vocabulary::default()
        };
        let vocab = CompiledVocabulary::compile(&only_label).unwrap();
        let contact = extract_contact_info(&vocab, "TÉLÉPHONE : 699-11-22-33").unwrap();
        assert_eq!(contact.phone.as_deref(), Some("699-11-22-33"));
    }

    #[test]
    fn test_no_contact_info() {
        assert!(extract_contact_info(&vocab(), "nothing to see").is_none());
    }

    #[test]
    fn test_labelled_address() {
        let address = extract_address(&vocab(), "Adresse: Bonamoussadi, Douala\nSkills").unwrap();
        assert_eq!(address, "Bonamoussadi, Douala");
    }

    #[test]
    fn test_city_label_address() {
        let address = extract_address(&vocab(), "City: Bafoussam West\nSkills").unwrap();
        assert_eq!(address, "Bafoussam West");
        let address = extract_address(&vocab(), "Ville : Garoua, Nord").unwrap();
        assert_eq!(address, "Garoua, Nord");
    }

    #[test]
    fn test_location_keyword_window() {
        let text = "Living in Cameroon since birth";
        assert_eq!(extract_address(&vocab(), text).as_deref(), Some(text));
    }

    #[test]
    fn test_no_address() {
        assert!(extract_address(&vocab(), "Paris, France").is_none());
    }

    #[test]
    fn test_summary_collects_following_lines() {
        let text = "PROFILE\nShort\nAmbitious engineer building mobile apps\n\
                    Loves distributed systems and clean code\nThird substantial line here\n\
                    Fourth substantial line here";
        let summary = extract_professional_summary(&vocab(), text).unwrap();
        assert_eq!(
            summary,
            "Ambitious engineer building mobile apps Loves distributed systems and clean code \
             Third substantial line here"
        );
    }

    #[test]
    fn test_summary_absent_without_keyword() {
        assert!(extract_professional_summary(&vocab(), "Experience\nIntern at Acme").is_none());
    }
}
