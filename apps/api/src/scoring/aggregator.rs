//! Score Aggregator — one pipeline, two weight tables.
//!
//! A `ScoringStrategy` supplies the weighted factors (and the human-readable
//! notes that go with them) for its mode; `aggregate` sums, rounds, clamps and
//! tiers the result the same way for every mode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::comparator::JobComparison;
use crate::scoring::report::{AtsTier, FeedbackItem, Severity};
use crate::scoring::signals::Signals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Skills,
    Experience,
    Education,
    Contact,
    Language,
    Achievements,
    Keywords,
    Requirements,
    Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    Generic,
    JobComparison,
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryWeight {
    pub category: Category,
    pub ceiling: f64,
}

const fn weight(category: Category, ceiling: f64) -> CategoryWeight {
    CategoryWeight { category, ceiling }
}

const GENERIC_WEIGHTS: &[CategoryWeight] = &[
    weight(Category::Skills, 30.0),
    weight(Category::Experience, 25.0),
    weight(Category::Education, 15.0),
    weight(Category::Contact, 10.0),
    weight(Category::Language, 10.0),
    weight(Category::Achievements, 10.0),
];

const JOB_COMPARISON_WEIGHTS: &[CategoryWeight] = &[
    weight(Category::Skills, 40.0),
    weight(Category::Keywords, 25.0),
    weight(Category::Requirements, 20.0),
    weight(Category::Experience, 10.0),
    weight(Category::Quality, 5.0),
];

/// Points deducted in generic mode for resumes under `SHORT_RESUME_WORDS`.
const SHORT_RESUME_PENALTY: f64 = 5.0;
const SHORT_RESUME_WORDS: usize = 200;
const LONG_RESUME_WORDS: usize = 1500;

impl ScoringMode {
    pub fn weights(self) -> &'static [CategoryWeight] {
        match self {
            ScoringMode::Generic => GENERIC_WEIGHTS,
            ScoringMode::JobComparison => JOB_COMPARISON_WEIGHTS,
        }
    }

    pub fn ceiling(self, category: Category) -> Option<f64> {
        self.weights()
            .iter()
            .find(|w| w.category == category)
            .map(|w| w.ceiling)
    }
}

/// Category → rounded sub-score.
pub type Breakdown = BTreeMap<Category, u32>;

/// Human-readable output collected while scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notes {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: Vec<FeedbackItem>,
    pub suggestions: Vec<String>,
}

impl Notes {
    fn add_feedback(&mut self, category: &str, severity: Severity, message: &str, suggestion: &str) {
        self.feedback.push(FeedbackItem {
            category: category.to_string(),
            severity,
            message: message.to_string(),
            suggestion: suggestion.to_string(),
        });
    }
}

/// Weighted factors plus any flat adjustment to the running total.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    pub factors: Vec<(Category, f64)>,
    pub adjustment: f64,
}

pub struct ScoringInput<'a> {
    pub signals: &'a Signals,
    pub skills: &'a [String],
}

pub trait ScoringStrategy {
    fn mode(&self) -> ScoringMode;

    /// Computes each weighted factor, recording notes as it goes.
    fn tally(&self, input: &ScoringInput<'_>, notes: &mut Notes) -> Tally;

    /// Runs after the final score is known.
    fn conclude(&self, _overall_score: u32, _notes: &mut Notes) {}
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub mode: ScoringMode,
    pub raw_total: f64,
    pub overall_score: u32,
    pub breakdown: Breakdown,
    pub tier: AtsTier,
    pub notes: Notes,
}

pub fn aggregate(strategy: &dyn ScoringStrategy, input: &ScoringInput<'_>) -> Aggregate {
    let mode = strategy.mode();
    let mut notes = Notes::default();
    let tally = strategy.tally(input, &mut notes);

    let raw_total: f64 = tally.factors.iter().map(|(_, s)| s).sum::<f64>() + tally.adjustment;
    let overall_score = clamp_score(raw_total);
    strategy.conclude(overall_score, &mut notes);

    let breakdown = tally
        .factors
        .iter()
        .map(|&(category, score)| {
            let ceiling = mode.ceiling(category).unwrap_or(0.0);
            (category, score.clamp(0.0, ceiling).round() as u32)
        })
        .collect();

    Aggregate {
        mode,
        raw_total,
        overall_score,
        breakdown,
        tier: AtsTier::from_score(raw_total),
        notes,
    }
}

/// Rounds to the nearest integer and clamps into `[0, 100]`.
pub fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, 100.0) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Generic resume-quality mode
// ────────────────────────────────────────────────────────────────────────────

pub struct GenericStrategy;

impl GenericStrategy {
    fn experience_points(years: u32) -> f64 {
        match years {
            y if y >= 5 => 25.0,
            y if y >= 3 => 20.0,
            y if y >= 1 => 15.0,
            _ => 10.0,
        }
    }
}

impl ScoringStrategy for GenericStrategy {
    fn mode(&self) -> ScoringMode {
        ScoringMode::Generic
    }

    fn tally(&self, input: &ScoringInput<'_>, notes: &mut Notes) -> Tally {
        let signals = input.signals;
        let skill_count = input.skills.len();
        let mut tally = Tally::default();

        let skills = (skill_count as f64 / 10.0 * 30.0).min(30.0);
        tally.factors.push((Category::Skills, skills));
        if skill_count >= 8 {
            notes.strengths.push(format!(
                "Excellent technical skills coverage ({skill_count} skills found)"
            ));
        } else if skill_count < 5 {
            notes
                .improvements
                .push("Add more relevant technical skills to your resume".to_string());
            notes.add_feedback(
                "Skills",
                Severity::High,
                "Add more technical skills relevant to your field",
                "Include programming languages, frameworks, tools, and technologies you have worked with",
            );
        }

        let years = signals.years_of_experience;
        tally
            .factors
            .push((Category::Experience, Self::experience_points(years)));
        if years >= 3 {
            notes
                .strengths
                .push(format!("Strong work experience ({years}+ years)"));
        }

        let education = if signals.has_education { 15.0 } else { 5.0 };
        tally.factors.push((Category::Education, education));
        if !signals.has_education {
            notes
                .improvements
                .push("Add your educational qualifications".to_string());
            notes.add_feedback(
                "Education",
                Severity::Medium,
                "Education section is missing or unclear",
                "Add your degree, major, university, and graduation year",
            );
        }

        let contact = if signals.has_email { 5.0 } else { 0.0 }
            + if signals.has_phone { 5.0 } else { 0.0 };
        tally.factors.push((Category::Contact, contact));
        if !signals.has_email || !signals.has_phone {
            notes
                .improvements
                .push("Ensure contact information is complete".to_string());
            notes.add_feedback(
                "Contact Info",
                Severity::High,
                "Missing contact information",
                "Add both email and phone number at the top of your resume",
            );
        }

        let language = (signals.strong_verb_count as f64 * 2.0).min(10.0);
        tally.factors.push((Category::Language, language));
        if signals.weak_phrase_count > signals.strong_verb_count {
            notes
                .improvements
                .push("Replace weak phrases with strong action verbs".to_string());
            notes.add_feedback(
                "Language",
                Severity::Medium,
                "Use stronger action verbs",
                "Replace phrases like \"responsible for\" with strong verbs like \"Led\", \"Developed\", \"Implemented\"",
            );
        } else {
            notes.strengths.push("Good use of action verbs".to_string());
        }

        let achievements = if signals.has_metrics { 10.0 } else { 0.0 };
        tally.factors.push((Category::Achievements, achievements));
        if signals.has_metrics {
            notes
                .strengths
                .push("Includes quantifiable achievements".to_string());
        } else {
            notes
                .improvements
                .push("Add quantifiable achievements and metrics".to_string());
            notes.add_feedback(
                "Achievements",
                Severity::High,
                "Lack of quantifiable achievements",
                "Add specific numbers, percentages, or metrics to demonstrate impact (e.g., \"Increased performance by 40%\")",
            );
        }

        if signals.word_count < SHORT_RESUME_WORDS {
            tally.adjustment -= SHORT_RESUME_PENALTY;
            notes
                .improvements
                .push("Resume is too short - aim for 400-800 words".to_string());
            notes.add_feedback(
                "Length",
                Severity::Medium,
                "Resume is too brief",
                "Expand on your experiences and achievements. Aim for a 1-2 page resume.",
            );
        } else if signals.word_count > LONG_RESUME_WORDS {
            notes
                .improvements
                .push("Resume is too long - be more concise".to_string());
            notes.add_feedback(
                "Length",
                Severity::Low,
                "Resume might be too lengthy",
                "Keep your resume concise. Focus on most relevant and recent experiences.",
            );
        } else {
            notes.strengths.push("Good resume length".to_string());
        }

        if signals.uses_first_person {
            notes.add_feedback(
                "Style",
                Severity::Low,
                "Avoid first-person pronouns",
                "Remove \"I\", \"me\", \"my\" from your resume. Use action verbs directly.",
            );
        }

        tally
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job-comparison mode
// ────────────────────────────────────────────────────────────────────────────

pub struct JobComparisonStrategy<'a> {
    comparison: &'a JobComparison,
}

impl<'a> JobComparisonStrategy<'a> {
    pub fn new(comparison: &'a JobComparison) -> Self {
        Self { comparison }
    }

    fn experience_points(signals: &Signals) -> f64 {
        if !signals.experience_mentioned {
            return 0.0;
        }
        match signals.years_of_experience {
            y if y >= 5 => 10.0,
            y if y >= 3 => 7.0,
            y if y >= 1 => 5.0,
            _ => 3.0,
        }
    }
}

fn scaled(matched: usize, total: usize, points: f64) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * points
    }
}

impl ScoringStrategy for JobComparisonStrategy<'_> {
    fn mode(&self) -> ScoringMode {
        ScoringMode::JobComparison
    }

    fn tally(&self, input: &ScoringInput<'_>, notes: &mut Notes) -> Tally {
        let cmp = self.comparison;
        let signals = input.signals;
        let mut tally = Tally::default();

        tally.factors.push((
            Category::Skills,
            scaled(cmp.matched_skills.len(), cmp.skill_total(), 40.0),
        ));
        tally.factors.push((
            Category::Keywords,
            scaled(cmp.matched_keywords.len(), cmp.keyword_total(), 25.0),
        ));

        // No requirement lines at all earns half credit rather than zero.
        let requirements = if cmp.requirement_total() == 0 {
            10.0
        } else {
            scaled(cmp.matched_requirements.len(), cmp.requirement_total(), 20.0)
        };
        tally.factors.push((Category::Requirements, requirements));

        tally
            .factors
            .push((Category::Experience, Self::experience_points(signals)));

        let quality = if signals.has_email { 2.5 } else { 0.0 }
            + if signals.has_phone { 2.5 } else { 0.0 };
        tally.factors.push((Category::Quality, quality));

        if !cmp.matched_skills.is_empty() {
            notes.strengths.push(format!(
                "Matches {} of {} required skills",
                cmp.matched_skills.len(),
                cmp.skill_total()
            ));
        }
        if !cmp.matched_keywords.is_empty() {
            notes.strengths.push(format!(
                "Reflects {} of {} job description keywords",
                cmp.matched_keywords.len(),
                cmp.keyword_total()
            ));
        }
        if !cmp.missing_skills.is_empty() {
            notes.improvements.push(format!(
                "Add missing required skills: {}",
                cmp.missing_skills.join(", ")
            ));
        }
        if !signals.has_email || !signals.has_phone {
            notes
                .improvements
                .push("Ensure contact information is complete".to_string());
        }

        tally
    }

    fn conclude(&self, overall_score: u32, notes: &mut Notes) {
        let cmp = self.comparison;
        let suggestions = &mut notes.suggestions;

        if !cmp.missing_skills.is_empty() {
            let top: Vec<&str> = cmp
                .missing_skills
                .iter()
                .take(5)
                .map(String::as_str)
                .collect();
            suggestions.push(format!(
                "Critical: add these required skills to your resume: {}",
                top.join(", ")
            ));
        }

        if cmp.missing_skills.len() > 5 {
            suggestions.push(format!(
                "Learn {} more required skills for a better match",
                cmp.missing_skills.len() - 5
            ));
        }

        if !cmp.missing_keywords.is_empty() {
            suggestions.push(format!(
                "Use these job description keywords in your resume: {}",
                cmp.missing_keywords.join(", ")
            ));
        }

        let missing_requirements = cmp.missing_requirements.len();
        if missing_requirements > 0 && missing_requirements <= 3 {
            suggestions.push(format!(
                "Address these requirements explicitly: {}",
                cmp.missing_requirements.join("; ")
            ));
        }

        if !cmp.matched_skills.is_empty() {
            suggestions.push(format!(
                "You have {} matching skills - highlight them prominently in your resume",
                cmp.matched_skills.len()
            ));
        }

        let tier_message = if overall_score >= 70 {
            "Great match! Your profile aligns well with this role."
        } else if overall_score >= 50 {
            "Good match. Consider adding the missing skills to strengthen your application."
        } else {
            "Low match. Focus on developing the missing skills for better chances."
        };
        suggestions.push(tier_message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals() -> Signals {
        Signals {
            word_count: 400,
            ..Default::default()
        }
    }

    fn skills(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Skill{i}")).collect()
    }

    #[test]
    fn test_weight_tables_sum_to_100() {
        for mode in [ScoringMode::Generic, ScoringMode::JobComparison] {
            let total: f64 = mode.weights().iter().map(|w| w.ceiling).sum();
            assert!((total - 100.0).abs() < f64::EPSILON, "{mode:?} sums to {total}");
        }
    }

    #[test]
    fn test_generic_skills_factor_caps_at_30() {
        let s = signals();
        let found = skills(14);
        let agg = aggregate(&GenericStrategy, &ScoringInput { signals: &s, skills: &found });
        assert_eq!(agg.breakdown[&Category::Skills], 30);
    }

    #[test]
    fn test_generic_experience_steps() {
        assert_eq!(GenericStrategy::experience_points(0), 10.0);
        assert_eq!(GenericStrategy::experience_points(1), 15.0);
        assert_eq!(GenericStrategy::experience_points(3), 20.0);
        assert_eq!(GenericStrategy::experience_points(5), 25.0);
        assert_eq!(GenericStrategy::experience_points(40), 25.0);
    }

    #[test]
    fn test_generic_floor_values() {
        let s = signals();
        let agg = aggregate(&GenericStrategy, &ScoringInput { signals: &s, skills: &[] });
        assert_eq!(agg.breakdown[&Category::Skills], 0);
        assert_eq!(agg.breakdown[&Category::Experience], 10);
        assert_eq!(agg.breakdown[&Category::Education], 5);
        assert_eq!(agg.breakdown[&Category::Contact], 0);
        assert_eq!(agg.breakdown[&Category::Language], 0);
        assert_eq!(agg.breakdown[&Category::Achievements], 0);
        assert_eq!(agg.overall_score, 15);
        assert_eq!(agg.tier, AtsTier::NeedsImprovement);
    }

    #[test]
    fn test_generic_short_resume_penalty() {
        let s = Signals {
            word_count: 50,
            ..Default::default()
        };
        let agg = aggregate(&GenericStrategy, &ScoringInput { signals: &s, skills: &[] });
        assert_eq!(agg.overall_score, 10);
        assert!(agg
            .notes
            .improvements
            .iter()
            .any(|i| i.contains("too short")));
    }

    #[test]
    fn test_generic_long_resume_has_note_but_no_penalty() {
        let s = Signals {
            word_count: 2000,
            ..Default::default()
        };
        let agg = aggregate(&GenericStrategy, &ScoringInput { signals: &s, skills: &[] });
        assert_eq!(agg.overall_score, 15);
        assert!(agg.notes.improvements.iter().any(|i| i.contains("too long")));
    }

    #[test]
    fn test_generic_weak_phrases_flagged_only_when_outnumbering_strong() {
        let even = Signals {
            word_count: 400,
            strong_verb_count: 2,
            weak_phrase_count: 1,
            ..Default::default()
        };
        let agg = aggregate(&GenericStrategy, &ScoringInput { signals: &even, skills: &[] });
        assert!(!agg.notes.improvements.iter().any(|i| i.contains("weak phrases")));
        assert_eq!(agg.breakdown[&Category::Language], 4);

        let weak = Signals {
            word_count: 400,
            strong_verb_count: 1,
            weak_phrase_count: 3,
            ..Default::default()
        };
        let agg = aggregate(&GenericStrategy, &ScoringInput { signals: &weak, skills: &[] });
        assert!(agg.notes.improvements.iter().any(|i| i.contains("weak phrases")));
        assert_eq!(agg.breakdown[&Category::Language], 2);
    }

    #[test]
    fn test_generic_first_person_is_feedback_only() {
        let plain = signals();
        let first_person = Signals {
            uses_first_person: true,
            ..signals()
        };
        let a = aggregate(&GenericStrategy, &ScoringInput { signals: &plain, skills: &[] });
        let b = aggregate(&GenericStrategy, &ScoringInput { signals: &first_person, skills: &[] });
        assert_eq!(a.overall_score, b.overall_score);
        assert!(b.notes.feedback.iter().any(|f| f.category == "Style"));
        assert!(!a.notes.feedback.iter().any(|f| f.category == "Style"));
    }

    #[test]
    fn test_generic_perfect_resume_clamps_to_100() {
        let s = Signals {
            word_count: 600,
            years_of_experience: 8,
            experience_mentioned: true,
            has_education: true,
            has_email: true,
            has_phone: true,
            strong_verb_count: 9,
            weak_phrase_count: 0,
            has_metrics: true,
            uses_first_person: false,
        };
        let found = skills(12);
        let agg = aggregate(&GenericStrategy, &ScoringInput { signals: &s, skills: &found });
        assert_eq!(agg.overall_score, 100);
        assert_eq!(agg.tier, AtsTier::Excellent);
    }

    fn comparison(matched: &[&str], missing: &[&str]) -> JobComparison {
        JobComparison {
            matched_skills: matched.iter().map(|s| s.to_string()).collect(),
            missing_skills: missing.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_job_skill_factor_scales_linearly() {
        let cmp = comparison(&["React"], &["Node.js", "Docker"]);
        let s = signals();
        let agg = aggregate(
            &JobComparisonStrategy::new(&cmp),
            &ScoringInput { signals: &s, skills: &[] },
        );
        assert_eq!(agg.breakdown[&Category::Skills], 13);
    }

    #[test]
    fn test_job_empty_requirements_get_half_credit() {
        let cmp = comparison(&["React"], &[]);
        let s = signals();
        let agg = aggregate(
            &JobComparisonStrategy::new(&cmp),
            &ScoringInput { signals: &s, skills: &[] },
        );
        assert_eq!(agg.breakdown[&Category::Requirements], 10);
        assert_eq!(agg.breakdown[&Category::Keywords], 0);
        // 40 + 0 + 10 + 0 + 0
        assert_eq!(agg.overall_score, 50);
    }

    #[test]
    fn test_job_experience_steps() {
        let at = |years: u32, mentioned: bool| {
            JobComparisonStrategy::experience_points(&Signals {
                years_of_experience: years,
                experience_mentioned: mentioned,
                ..Default::default()
            })
        };
        assert_eq!(at(0, false), 0.0);
        assert_eq!(at(0, true), 3.0);
        assert_eq!(at(1, true), 5.0);
        assert_eq!(at(3, true), 7.0);
        assert_eq!(at(5, true), 10.0);
    }

    #[test]
    fn test_job_quality_factor() {
        let cmp = comparison(&["React"], &[]);
        let s = Signals {
            has_email: true,
            has_phone: true,
            ..signals()
        };
        let agg = aggregate(
            &JobComparisonStrategy::new(&cmp),
            &ScoringInput { signals: &s, skills: &[] },
        );
        assert_eq!(agg.breakdown[&Category::Quality], 5);
    }

    #[test]
    fn test_job_suggestion_order() {
        let cmp = JobComparison {
            matched_skills: vec!["React".to_string()],
            missing_skills: (1..=7).map(|i| format!("Tool{i}")).collect(),
            matched_keywords: vec![],
            missing_keywords: vec!["cloud".to_string()],
            matched_requirements: vec![],
            missing_requirements: vec!["Five years of Kafka".to_string()],
        };
        let s = signals();
        let agg = aggregate(
            &JobComparisonStrategy::new(&cmp),
            &ScoringInput { signals: &s, skills: &[] },
        );
        let suggestions = &agg.notes.suggestions;
        assert_eq!(suggestions.len(), 6);
        assert!(suggestions[0].starts_with("Critical"));
        assert!(suggestions[0].contains("Tool5"));
        assert!(!suggestions[0].contains("Tool6"));
        assert!(suggestions[1].contains("Learn 2 more"));
        assert!(suggestions[2].contains("cloud"));
        assert!(suggestions[3].contains("Five years of Kafka"));
        assert!(suggestions[4].contains("1 matching skills"));
        assert!(suggestions[5].starts_with("Low match"));
    }

    fn job_suggestions(cmp: &JobComparison) -> Vec<String> {
        let s = signals();
        aggregate(
            &JobComparisonStrategy::new(cmp),
            &ScoringInput { signals: &s, skills: &[] },
        )
        .notes
        .suggestions
    }

    fn requirements(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Requirement {i}")).collect()
    }

    #[test]
    fn test_requirement_notice_up_to_three_missing() {
        let cmp = JobComparison {
            missing_requirements: requirements(3),
            ..comparison(&["React"], &[])
        };
        let suggestions = job_suggestions(&cmp);
        assert!(suggestions
            .iter()
            .any(|s| s.starts_with("Address these requirements") && s.contains("Requirement 3")));
    }

    #[test]
    fn test_requirement_notice_omitted_above_three_missing() {
        let cmp = JobComparison {
            missing_requirements: requirements(4),
            ..comparison(&["React"], &[])
        };
        let suggestions = job_suggestions(&cmp);
        assert!(!suggestions.iter().any(|s| s.contains("Requirement")));
    }

    #[test]
    fn test_learn_more_notice_only_beyond_five_missing_skills() {
        let cmp = comparison(&[], &["A1", "A2", "A3", "A4", "A5"]);
        let suggestions = job_suggestions(&cmp);
        assert!(suggestions[0].starts_with("Critical"));
        assert!(suggestions[0].contains("A5"));
        assert!(!suggestions.iter().any(|s| s.starts_with("Learn")));
    }

    #[test]
    fn test_job_tier_messages() {
        let strategy_cmp = comparison(&[], &[]);
        let strategy = JobComparisonStrategy::new(&strategy_cmp);
        let message_for = |score: u32| {
            let mut notes = Notes::default();
            strategy.conclude(score, &mut notes);
            notes.suggestions.last().cloned().unwrap()
        };
        assert!(message_for(49).starts_with("Low match"));
        assert!(message_for(50).starts_with("Good match"));
        assert!(message_for(69).starts_with("Good match"));
        assert!(message_for(70).starts_with("Great match"));
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-4.0), 0);
        assert_eq!(clamp_score(104.6), 100);
        assert_eq!(clamp_score(13.5), 14);
        assert_eq!(clamp_score(13.49), 13);
    }
}
