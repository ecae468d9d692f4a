//! Signal detectors — experience, education, contact, verb strength, metrics, style.
//!
//! Every detector is independent and infallible; finding nothing simply yields the
//! floor value for that signal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::normalizer::tokenize;

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "mba",
    "b.tech",
    "m.tech",
    "b.s",
    "m.s",
    "degree",
    "university",
    "college",
];

const STRONG_VERBS: &[&str] = &[
    "led",
    "managed",
    "developed",
    "created",
    "implemented",
    "designed",
    "architected",
    "optimized",
    "improved",
    "achieved",
    "increased",
    "reduced",
];

const WEAK_PHRASES: &[&str] = &[
    "responsible for",
    "worked on",
    "helped with",
    "assisted",
    "participated",
];

static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+)\+?\s*years?",
        r"(\d+)\+?\s*yrs?",
        r"(\d{4})\s*-\s*(\d{4}|present)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3}[-\s]?)?\d{10}|\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

static METRICS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+%|\$\d+|increased by|reduced by|improved by").unwrap());

/// Everything the detectors found in one normalized resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub word_count: usize,
    /// Largest integer found in any experience mention; 0 when none.
    pub years_of_experience: u32,
    pub experience_mentioned: bool,
    pub has_education: bool,
    pub has_email: bool,
    pub has_phone: bool,
    pub strong_verb_count: usize,
    pub weak_phrase_count: usize,
    pub has_metrics: bool,
    pub uses_first_person: bool,
}

/// Runs every detector over already-normalized text.
pub fn detect_signals(normalized_text: &str) -> Signals {
    let years = detect_years_of_experience(normalized_text);
    Signals {
        word_count: tokenize(normalized_text).len(),
        years_of_experience: years.unwrap_or(0),
        experience_mentioned: years.is_some(),
        has_education: has_education(normalized_text),
        has_email: has_email(normalized_text),
        has_phone: has_phone(normalized_text),
        strong_verb_count: count_present(normalized_text, STRONG_VERBS),
        weak_phrase_count: count_present(normalized_text, WEAK_PHRASES),
        has_metrics: has_metrics(normalized_text),
        uses_first_person: uses_first_person(normalized_text),
    }
}

/// Maximum integer across all experience matches (not a sum).
///
/// Each match contributes the first number inside it, so a `2015-present`
/// range contributes `2015`. `None` when no pattern matches.
pub fn detect_years_of_experience(text: &str) -> Option<u32> {
    let mut best: Option<u32> = None;
    for pattern in EXPERIENCE_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            // Overlong digit runs don't fit u32; skip them rather than saturate.
            let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
                continue;
            };
            best = Some(best.map_or(value, |b| b.max(value)));
        }
    }
    best
}

/// Plain substring check (no word boundaries) so abbreviations like `b.s` hit.
pub fn has_education(text: &str) -> bool {
    EDUCATION_KEYWORDS.iter().any(|k| text.contains(k))
}

pub fn has_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

pub fn has_phone(text: &str) -> bool {
    PHONE_RE.is_match(text)
}

pub fn has_metrics(text: &str) -> bool {
    METRICS_RE.is_match(text)
}

/// Counts how many list entries appear at least once (presence, not frequency).
fn count_present(text: &str, list: &[&str]) -> usize {
    list.iter().filter(|term| text.contains(*term)).count()
}

fn uses_first_person(text: &str) -> bool {
    text.starts_with("i ") || text.contains(" i ")
}
