use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::identity::EMAIL_RE;

static PHONE_SIGNAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\+237|237|\+33|0)[\s\-]?[0-9]{8,10}").unwrap());
static YEAR_SIGNAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]{4}\b").unwrap());
static SKILLS_SIGNAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Compétences?|Skills?)\b").unwrap());
static EDUCATION_SIGNAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Education|Formation)\b").unwrap());

/// (minimum length in chars, weight). Each threshold exceeded adds its weight.
const LENGTH_WEIGHTS: &[(usize, f64)] = &[(500, 0.2), (1000, 0.2)];

/// Weights for the presence of each signal in the text.
const SIGNAL_WEIGHTS: &[(Signal, f64)] = &[
    (Signal::Email, 0.15),
    (Signal::Phone, 0.15),
    (Signal::Year, 0.1),
    (Signal::SkillsHeading, 0.1),
    (Signal::EducationHeading, 0.1),
];

#[derive(Debug, Clone, Copy)]
enum Signal {
    Email,
    Phone,
    Year,
    SkillsHeading,
    EducationHeading,
}

impl Signal {
    fn present_in(self, text: &str) -> bool {
        let re: &Regex = match self {
            Signal::Email => &EMAIL_RE,
            Signal::Phone => &PHONE_SIGNAL_RE,
            Signal::Year => &YEAR_SIGNAL_RE,
            Signal::SkillsHeading => &SKILLS_SIGNAL_RE,
            Signal::EducationHeading => &EDUCATION_SIGNAL_RE,
        };
        re.is_match(text)
    }
}

/// Additive reliability estimate, clamped to [0, 1].
pub fn compute_confidence_score(text: &str) -> f64 {
    let length = text.chars().count();

    let length_score = LENGTH_WEIGHTS
        .iter()
        .filter(|(min, _)| length > *min)
        .fold(0.0_f64, |acc, (_, w)| acc + w);
    let signal_score = SIGNAL_WEIGHTS
        .iter()
        .filter(|(signal, _)| signal.present_in(text))
        .fold(0.0_f64, |acc, (_, w)| acc + w);

    (length_score + signal_score).clamp(0.0, 1.0)
}
