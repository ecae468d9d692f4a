//! Job specification input and job-description keyword derivation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Action verbs looked for in a job description.
pub const ACTION_KEYWORDS: &[&str] = &[
    "develop",
    "design",
    "implement",
    "manage",
    "lead",
    "create",
    "build",
    "maintain",
    "collaborate",
    "analyze",
];

/// Qualification words looked for in a job description.
pub const QUALIFICATION_KEYWORDS: &[&str] = &[
    "degree",
    "bachelor",
    "master",
    "certification",
    "experience",
    "knowledge",
];

/// Domain/tool words looked for in a job description.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "api",
    "database",
    "cloud",
    "testing",
    "deployment",
    "architecture",
    "framework",
];

/// Structured job posting supplied by the caller for job-comparison mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Free-text requirement bullet lines.
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl JobSpec {
    /// Required skills with blanks dropped and case-insensitive duplicates
    /// removed, keeping the first spelling.
    pub fn unique_required_skills(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.required_skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .map(str::to_string)
            .collect()
    }

    /// The keywords the description itself uses. See [`derive_job_keywords`].
    pub fn keywords(&self) -> Vec<&'static str> {
        derive_job_keywords(&self.description)
    }
}

/// Scans a job description for the fixed keyword families (action,
/// qualification, domain) and keeps those present, deduplicated, in family order.
pub fn derive_job_keywords(description: &str) -> Vec<&'static str> {
    let description = description.to_lowercase();
    let mut seen = HashSet::new();

    ACTION_KEYWORDS
        .iter()
        .chain(QUALIFICATION_KEYWORDS)
        .chain(DOMAIN_KEYWORDS)
        .copied()
        .filter(|k| description.contains(k))
        .filter(|k| seen.insert(*k))
        .collect()
}
