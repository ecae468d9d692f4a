//! Job Comparator — sorts required skills, job keywords and requirement lines
//! into matched/missing sets against a normalized resume.
//!
//! All checks here are plain substring tests (not word-boundary), unlike the
//! skill extractor.

use serde::{Deserialize, Serialize};

use crate::scoring::job::JobSpec;

/// Requirement tokens this short or shorter are ignored.
const MIN_REQUIREMENT_TOKEN_CHARS: usize = 3;

/// Description tokens must be longer than this to count toward `match_score`.
const MIN_DESCRIPTION_TOKEN_CHARS: usize = 4;

/// Matched/missing sets for one resume against one job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobComparison {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched_requirements: Vec<String>,
    pub missing_requirements: Vec<String>,
}

impl JobComparison {
    pub fn skill_total(&self) -> usize {
        self.matched_skills.len() + self.missing_skills.len()
    }

    pub fn keyword_total(&self) -> usize {
        self.matched_keywords.len() + self.missing_keywords.len()
    }

    pub fn requirement_total(&self) -> usize {
        self.matched_requirements.len() + self.missing_requirements.len()
    }
}

/// Compares a normalized (lower-cased) resume against a job.
pub fn compare(normalized_resume: &str, job: &JobSpec) -> JobComparison {
    let mut comparison = JobComparison::default();

    for skill in job.unique_required_skills() {
        if normalized_resume.contains(&skill.to_lowercase()) {
            comparison.matched_skills.push(skill);
        } else {
            comparison.missing_skills.push(skill);
        }
    }

    for keyword in job.keywords() {
        if normalized_resume.contains(keyword) {
            comparison.matched_keywords.push(keyword.to_string());
        } else {
            comparison.missing_keywords.push(keyword.to_string());
        }
    }

    for requirement in &job.requirements {
        if requirement_matched(normalized_resume, requirement) {
            comparison.matched_requirements.push(requirement.clone());
        } else {
            comparison.missing_requirements.push(requirement.clone());
        }
    }

    comparison
}

/// A requirement line matches when more than half of its significant tokens
/// (longer than three chars) occur in the resume. A line with no significant
/// tokens never matches.
pub fn requirement_matched(normalized_resume: &str, requirement: &str) -> bool {
    let requirement = requirement.to_lowercase();
    let tokens: Vec<&str> = requirement
        .split(' ')
        .filter(|t| t.chars().count() > MIN_REQUIREMENT_TOKEN_CHARS)
        .collect();

    let found = tokens
        .iter()
        .filter(|t| normalized_resume.contains(*t))
        .count();

    found * 2 > tokens.len()
}

/// Share (0–100) of the description's longer words that appear in the resume.
/// Repeated words count each time. 0 when the description has no such words.
pub fn description_overlap(normalized_resume: &str, description: &str) -> u32 {
    let description = description.to_lowercase();
    let tokens: Vec<&str> = description
        .split_whitespace()
        .filter(|t| t.chars().count() > MIN_DESCRIPTION_TOKEN_CHARS)
        .collect();

    if tokens.is_empty() {
        return 0;
    }

    let found = tokens
        .iter()
        .filter(|t| normalized_resume.contains(*t))
        .count();

    ((found as f64 / tokens.len() as f64) * 100.0).round() as u32
}
