//! Ordered keyword table and the matcher over it.

use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hi! I'm PlacementBot, your 24/7 placement assistant. \
Ask me anything: cutoffs, dates, how to apply, venues and more!";

pub const SUGGESTIONS: [&str; 4] = [
    "What is the CGPA cutoff?",
    "When is the next interview?",
    "How do I apply?",
    "Where is the venue?",
];

pub const DEFAULT_FALLBACK: &str = "I'm not sure about that yet! Please contact the \
Placement Office or check the notice board. I can help with cutoffs, interview dates, \
venues, and how to apply.";

/// One keyword set and its canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub keywords: Vec<String>,
    pub answer: String,
}

impl QaEntry {
    #[must_use]
    pub fn new(keywords: &[&str], answer: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            answer: answer.to_string(),
        }
    }

    /// Case-insensitive substring match of any keyword.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lowered.contains(&k.to_lowercase()))
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<QaEntry>,
    fallback: String,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            entries: builtin_entries(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl KnowledgeBase {
    #[must_use]
    pub fn new(entries: Vec<QaEntry>, fallback: String) -> Self {
        Self { entries, fallback }
    }

    /// Put `extra` ahead of the current entries so it wins on overlap.
    #[must_use]
    pub fn with_extra_entries(mut self, extra: Vec<QaEntry>) -> Self {
        let mut entries = extra;
        entries.append(&mut self.entries);
        self.entries = entries;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        if let Some(fallback) = fallback.filter(|f| !f.trim().is_empty()) {
            self.fallback = fallback;
        }
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[QaEntry] {
        &self.entries
    }

    /// First matching entry's answer, else the fallback.
    #[must_use]
    pub fn reply(&self, input: &str) -> &str {
        let lowered = input.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.matches(&lowered))
            .map_or(self.fallback.as_str(), |entry| entry.answer.as_str())
    }
}

fn builtin_entries() -> Vec<QaEntry> {
    vec![
        QaEntry::new(
            &["cutoff", "cgpa", "minimum"],
            "Cutoffs vary by company. TCS Digital requires 7.0 CGPA, Google requires 8.5, \
             and Accenture requires 6.5. Check the Live Feed for full details.",
        ),
        QaEntry::new(
            &["interview", "when", "schedule", "date"],
            "TCS Digital interviews are on Aug 10, Google on Aug 18, and Accenture on Aug 22. \
             Your personal schedule is in the Application Tracker.",
        ),
        QaEntry::new(
            &["venue", "location", "where"],
            "All drives are held in the Main Seminar Hall (Block A, 2nd Floor) unless notified \
             otherwise. Check your email for any last-minute changes.",
        ),
        QaEntry::new(
            &["apply", "how", "register"],
            "Go to the Student Portal, open the Live Feed and click \"Apply Now\" on any eligible \
             drive. You must meet the CGPA and backlog criteria to apply.",
        ),
        QaEntry::new(
            &["resume", "cv"],
            "Use the Resume Wizard in the Student Portal to generate a college-branded PDF \
             resume instantly. Fill in your skills, marks, and project details.",
        ),
        QaEntry::new(
            &["backlog", "arrear"],
            "Most companies allow 0 backlogs. Accenture and Infosys allow 1 active backlog. \
             Clear your backlogs before the drive date to stay eligible.",
        ),
        QaEntry::new(
            &["result", "selected", "status"],
            "Check your Application Tracker in the Student Portal. Statuses update in real time: \
             Applied, Aptitude, Interview, Selected.",
        ),
        QaEntry::new(
            &["hello", "hi", "hey"],
            "Hi! I'm PlacementBot, your 24/7 career assistant. Ask me about cutoffs, interview \
             dates, venues, how to apply, or anything placement-related!",
        ),
    ]
}
