//! Report Builder — assembles the immutable `ScoreReport` returned to callers.

use serde::{Deserialize, Serialize};

use crate::scoring::aggregator::{Aggregate, Breakdown, ScoringMode};
use crate::scoring::comparator::JobComparison;
use crate::scoring::signals::Signals;

/// Compatibility tier. Boundaries are strict greater-than.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtsTier {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl AtsTier {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            AtsTier::Excellent
        } else if score > 50.0 {
            AtsTier::Good
        } else if score > 30.0 {
            AtsTier::Fair
        } else {
            AtsTier::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AtsTier::Excellent => "Excellent",
            AtsTier::Good => "Good",
            AtsTier::Fair => "Fair",
            AtsTier::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One structured feedback item (generic mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub category: String,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

/// Job-comparison results. Only present on job-mode reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchDetails {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched_requirements: Vec<String>,
    pub missing_requirements: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub mode: ScoringMode,
    pub overall_score: u32,
    pub breakdown: Breakdown,
    pub ats_compatibility: AtsTier,
    pub found_skills: Vec<String>,
    pub years_of_experience: u32,
    pub word_count: usize,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: Vec<FeedbackItem>,
    /// Share of a free-text job description's words found in the resume (generic mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u32>,
    #[serde(flatten)]
    pub job_match: Option<JobMatchDetails>,
}

/// Builder over an `Aggregate`; the remaining pieces are optional per mode.
pub struct ReportBuilder<'a> {
    aggregate: Aggregate,
    signals: &'a Signals,
    found_skills: Vec<String>,
    match_score: Option<u32>,
    comparison: Option<JobComparison>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(aggregate: Aggregate, signals: &'a Signals) -> Self {
        Self {
            aggregate,
            signals,
            found_skills: Vec::new(),
            match_score: None,
            comparison: None,
        }
    }

    pub fn found_skills(mut self, skills: Vec<String>) -> Self {
        self.found_skills = skills;
        self
    }

    pub fn match_score(mut self, score: Option<u32>) -> Self {
        self.match_score = score;
        self
    }

    pub fn comparison(mut self, comparison: JobComparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    pub fn build(self) -> ScoreReport {
        let Aggregate {
            mode,
            overall_score,
            breakdown,
            tier,
            notes,
            ..
        } = self.aggregate;

        let job_match = self.comparison.map(|cmp| JobMatchDetails {
            matched_skills: cmp.matched_skills,
            missing_skills: cmp.missing_skills,
            matched_keywords: cmp.matched_keywords,
            missing_keywords: cmp.missing_keywords,
            matched_requirements: cmp.matched_requirements,
            missing_requirements: cmp.missing_requirements,
            suggestions: notes.suggestions,
        });

        ScoreReport {
            mode,
            overall_score,
            breakdown,
            ats_compatibility: tier,
            found_skills: self.found_skills,
            years_of_experience: self.signals.years_of_experience,
            word_count: self.signals.word_count,
            strengths: notes.strengths,
            improvements: notes.improvements,
            feedback: notes.feedback,
            match_score: self.match_score,
            job_match,
        }
    }
}
