//! Line-driven state machine shared by the work experience and education
//! extractors.
//!
//! A "start" line opens a new entry and becomes its heading. Following
//! non-empty lines fill the first free slot: a short line (< 100 chars) becomes
//! the organisation, a line with a 4-digit year becomes the date, anything
//! else is description. A heading year fills the date only if no line did. An entry is emitted when the next start line arrives
//! or the text ends.

use crate::extraction::models::{Education, WorkExperience};
use crate::extraction::patterns::CompiledVocabulary;
use crate::extraction::scan::{first_year, has_year};

const MAX_ORGANISATION_CHARS: usize = 100;

/// Slot-generic entry under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub heading: String,
    pub organisation: String,
    pub date: String,
    pub details: Vec<String>,
}

impl EntryDraft {
    fn open(line: &str) -> Self {
        Self {
            heading: line.to_string(),
            ..Default::default()
        }
    }

    /// A heading such as "Bachelor of Science, 2019" carries its own date,
    /// used only when no following line supplied one.
    fn close(mut self) -> Self {
        if self.date.is_empty() {
            self.date = first_year(&self.heading).unwrap_or_default().to_string();
        }
        self
    }

    fn absorb(&mut self, line: &str) {
        if self.organisation.is_empty() && line.chars().count() < MAX_ORGANISATION_CHARS {
            self.organisation = line.to_string();
        } else if self.date.is_empty() && has_year(line) {
            self.date = line.to_string();
        } else {
            self.details.push(line.to_string());
        }
    }
}

#[derive(Debug, Default)]
enum EntryState {
    #[default]
    Seeking,
    InEntry(EntryDraft),
}

/// Accumulates entries over a sequence of lines.
#[derive(Debug, Default)]
pub struct EntryMachine {
    state: EntryState,
    finished: Vec<EntryDraft>,
}

impl EntryMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str, starts_entry: bool) {
        let line = line.trim();
        if starts_entry {
            let opened = EntryState::InEntry(EntryDraft::open(line));
            let previous = std::mem::replace(&mut self.state, opened);
            self.flush(previous);
            return;
        }
        if line.is_empty() {
            return;
        }
        if let EntryState::InEntry(draft) = &mut self.state {
            draft.absorb(line);
        }
    }

    pub fn finish(mut self) -> Vec<EntryDraft> {
        let last = std::mem::take(&mut self.state);
        self.flush(last);
        self.finished
    }

    fn flush(&mut self, state: EntryState) {
        if let EntryState::InEntry(draft) = state {
            if !draft.heading.is_empty() {
                self.finished.push(draft.close());
            }
        }
    }
}

fn run_machine(text: &str, starts_entry: impl Fn(&str) -> bool) -> Vec<EntryDraft> {
    let mut machine = EntryMachine::new();
    for line in text.split('\n') {
        machine.feed(line, starts_entry(line));
    }
    machine.finish()
}

fn is_job_start(vocab: &CompiledVocabulary, line: &str) -> bool {
    let lowered = line.to_lowercase();
    vocab.job_keywords.iter().any(|k| lowered.contains(k.as_str()))
        || vocab.employer_patterns.iter().any(|re| re.is_match(line))
}

fn is_education_start(vocab: &CompiledVocabulary, line: &str) -> bool {
    vocab.education_patterns.iter().any(|re| re.is_match(line))
}

pub fn extract_work_experience(
    vocab: &CompiledVocabulary,
    text: &str,
) -> Option<Vec<WorkExperience>> {
    let entries: Vec<WorkExperience> = run_machine(text, |line| is_job_start(vocab, line))
        .into_iter()
        .map(|d| WorkExperience {
            title: d.heading,
            company: d.organisation,
            period: d.date,
            description: d.details,
        })
        .collect();
    (!entries.is_empty()).then_some(entries)
}

pub fn extract_education(vocab: &CompiledVocabulary, text: &str) -> Option<Vec<Education>> {
    let entries: Vec<Education> = run_machine(text, |line| is_education_start(vocab, line))
        .into_iter()
        .map(|d| Education {
            degree: d.heading,
            institution: d.organisation,
            year: d.date,
            description: d.details,
        })
        .collect();
    (!entries.is_empty()).then_some(entries)
}
