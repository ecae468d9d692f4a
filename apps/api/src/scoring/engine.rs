//! Engine entry points — validate preconditions, run the pipeline, build the report.
//!
//! raw text → normalizer → {skills, signals} → comparator (job mode) → aggregator → report
//!
//! Every call is a pure function of its inputs and the shared taxonomy. The
//! `MatchScorer` trait lets `AppState` swap backends without touching handlers.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::scoring::aggregator::{
    aggregate, GenericStrategy, JobComparisonStrategy, ScoringInput, ScoringStrategy,
};
use crate::scoring::comparator::{compare, description_overlap};
use crate::scoring::job::JobSpec;
use crate::scoring::normalizer::normalize;
use crate::scoring::report::{ReportBuilder, ScoreReport};
use crate::scoring::signals::detect_signals;
use crate::scoring::skills::extract_skills;

/// Required skills joined with ", " must be at least this long.
const MIN_REQUIRED_SKILLS_CHARS: usize = 5;

/// Input length bounds, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Minimum trimmed length for resume text and job descriptions.
    pub min_text_chars: usize,
    /// Hard ceiling for any single text input; longer input is rejected, never truncated.
    pub max_input_chars: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            min_text_chars: 50,
            max_input_chars: 50_000,
        }
    }
}

impl EngineLimits {
    /// Rejects text over the ceiling.
    pub fn check_ceiling(&self, field: &str, text: &str) -> Result<(), AppError> {
        let chars = text.chars().count();
        if chars > self.max_input_chars {
            return Err(AppError::InvalidInput(format!(
                "{field} is too long ({chars} characters); the maximum is {}",
                self.max_input_chars
            )));
        }
        Ok(())
    }

    fn check_resume(&self, resume_text: &str) -> Result<(), AppError> {
        self.check_ceiling("resume_text", resume_text)?;
        if resume_text.trim().chars().count() < self.min_text_chars {
            return Err(AppError::InvalidInput(format!(
                "resume_text must contain at least {} characters. Paste the full resume text or upload a plain-text file.",
                self.min_text_chars
            )));
        }
        Ok(())
    }

    fn check_job(&self, job: &JobSpec) -> Result<(), AppError> {
        self.check_ceiling("job.description", &job.description)?;
        self.check_ceiling("job.requirements", &job.requirements.join("\n"))?;
        self.check_ceiling("job.required_skills", &job.required_skills.join(", "))?;

        if job.description.trim().chars().count() < self.min_text_chars {
            return Err(AppError::InvalidInput(format!(
                "job.description must contain at least {} characters. Provide the full job description.",
                self.min_text_chars
            )));
        }

        if job.required_skills.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::InvalidInput(
                "job.required_skills must not contain blank entries".to_string(),
            ));
        }

        let skills = job.unique_required_skills();
        if skills.is_empty() || skills.join(", ").chars().count() < MIN_REQUIRED_SKILLS_CHARS {
            return Err(AppError::InvalidInput(
                "job.required_skills must list the skills the role requires".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stateless scoring engine parameterised by input limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    limits: EngineLimits,
}

impl ScoringEngine {
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    /// Generic resume-quality analysis, plus `match_score` when a free-text job
    /// description is given. A blank description is treated as absent.
    pub fn analyze_generic(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<ScoreReport, AppError> {
        self.limits.check_resume(resume_text)?;
        let job_description = job_description.filter(|d| !d.trim().is_empty());
        if let Some(description) = job_description {
            self.limits.check_ceiling("job_description", description)?;
        }

        let normalized = normalize(resume_text);
        let match_score = job_description.map(|d| description_overlap(&normalized, d));

        let report = run_pipeline(&normalized, &GenericStrategy, |builder| {
            builder.match_score(match_score)
        });

        info!(
            mode = "generic",
            words = report.word_count,
            skills = report.found_skills.len(),
            score = report.overall_score,
            tier = report.ats_compatibility.label(),
            "Resume analyzed"
        );
        Ok(report)
    }

    /// Job-comparison analysis.
    pub fn analyze_against_job(
        &self,
        resume_text: &str,
        job: &JobSpec,
    ) -> Result<ScoreReport, AppError> {
        self.limits.check_resume(resume_text)?;
        self.limits.check_job(job)?;

        let normalized = normalize(resume_text);
        let comparison = compare(&normalized, job);
        let strategy = JobComparisonStrategy::new(&comparison);

        let report = run_pipeline(&normalized, &strategy, |builder| {
            builder.comparison(comparison.clone())
        });

        info!(
            mode = "job_comparison",
            words = report.word_count,
            matched_skills = comparison.matched_skills.len(),
            missing_skills = comparison.missing_skills.len(),
            score = report.overall_score,
            tier = report.ats_compatibility.label(),
            "Resume compared against job"
        );
        Ok(report)
    }
}

/// Shared pipeline: extract, detect, aggregate, then let the caller add
/// mode-specific pieces before the report is built.
fn run_pipeline<F>(normalized: &str, strategy: &dyn ScoringStrategy, finish: F) -> ScoreReport
where
    F: for<'s> FnOnce(ReportBuilder<'s>) -> ReportBuilder<'s>,
{
    let skills = extract_skills(normalized);
    let signals = detect_signals(normalized);

    let aggregate = aggregate(
        strategy,
        &ScoringInput {
            signals: &signals,
            skills: &skills,
        },
    );

    finish(ReportBuilder::new(aggregate, &signals).found_skills(skills)).build()
}

// ────────────────────────────────────────────────────────────────────────────
// Pluggable scorer
// ────────────────────────────────────────────────────────────────────────────

/// Scorer backend carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn analyze_generic(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<ScoreReport, AppError>;

    async fn analyze_against_job(
        &self,
        resume_text: &str,
        job: &JobSpec,
    ) -> Result<ScoreReport, AppError>;

    /// "rules" | … — for transparency in logs.
    fn backend(&self) -> &'static str;
}

/// Deterministic rule-based scorer. Default backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedScorer {
    engine: ScoringEngine,
}

impl RuleBasedScorer {
    pub fn new(limits: EngineLimits) -> Self {
        Self {
            engine: ScoringEngine::new(limits),
        }
    }
}

#[async_trait]
impl MatchScorer for RuleBasedScorer {
    async fn analyze_generic(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<ScoreReport, AppError> {
        self.engine
            .analyze_generic(resume_text, job_description)
    }

    async fn analyze_against_job(
        &self,
        resume_text: &str,
        job: &JobSpec,
    ) -> Result<ScoreReport, AppError> {
        self.engine.analyze_against_job(resume_text, job)
    }

    fn backend(&self) -> &'static str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::aggregator::{Category, ScoringMode};
    use crate::scoring::report::AtsTier;

    const SCENARIO_A: &str = "I am a Python developer with 5 years of experience. \
        Email: a@b.com. Phone: 555-123-4567. Increased throughput by 40%.";

    const PLAIN_RESUME: &str = "Friendly person who enjoys hiking on weekends, \
        baking bread for neighbours and volunteering at the animal shelter near home.";

    fn job(skills: &[&str], requirements: &[&str]) -> JobSpec {
        JobSpec {
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            requirements: requirements.iter().map(|s| s.to_string()).collect(),
            description: "We are hiring a frontend engineer to design and build customer \
                facing web applications with modern tooling and a strong team."
                .to_string(),
        }
    }

    fn analyze_generic(resume_text: &str) -> Result<ScoreReport, AppError> {
        ScoringEngine::default().analyze_generic(resume_text, None)
    }

    fn analyze_against_job(resume_text: &str, job: &JobSpec) -> Result<ScoreReport, AppError> {
        ScoringEngine::default().analyze_against_job(resume_text, job)
    }

    fn report_errs(result: Result<ScoreReport, AppError>) -> String {
        match result {
            Err(AppError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_scenario_a_generic_signals() {
        let report = analyze_generic(SCENARIO_A).unwrap();
        assert_eq!(report.mode, ScoringMode::Generic);
        assert_eq!(report.years_of_experience, 5);
        assert_eq!(report.breakdown[&Category::Achievements], 10);
        assert_eq!(report.breakdown[&Category::Contact], 10);
        assert!(report.found_skills.contains(&"Python".to_string()));
        assert!(report.feedback.iter().any(|f| f.category == "Style"));
    }

    #[test]
    fn test_scenario_b_plain_resume_is_lowest_tier() {
        let report = analyze_generic(PLAIN_RESUME).unwrap();
        assert!(report.found_skills.is_empty(), "{:?}", report.found_skills);
        assert!(report.overall_score <= 30);
        assert_eq!(report.ats_compatibility, AtsTier::NeedsImprovement);
    }

    #[test]
    fn test_scenario_c_job_skill_split() {
        let resume = "Frontend engineer focused on React component libraries, \
            accessibility audits and design systems for large teams.";
        let report = analyze_against_job(resume, &job(&["React", "Node.js", "Docker"], &[])).unwrap();
        let job_match = report.job_match.as_ref().unwrap();
        assert_eq!(job_match.matched_skills, vec!["React"]);
        assert_eq!(job_match.missing_skills, vec!["Node.js", "Docker"]);
        assert_eq!(report.breakdown[&Category::Skills], 13);
        assert!(job_match.suggestions[0].starts_with("Critical"));
    }

    #[test]
    fn test_scenario_d_short_description_rejected() {
        let mut j = job(&["React", "Docker"], &[]);
        j.description = "Frontend engineer, remote team.".to_string();
        assert_eq!(j.description.chars().count(), 31);
        let msg = report_errs(analyze_against_job(SCENARIO_A, &j));
        assert!(msg.contains("job.description"));
    }

    #[test]
    fn test_scenario_e_weak_phrase_not_flagged_when_outnumbered() {
        let resume = "Senior engineer. Led the platform group and developed the billing \
            service. Also responsible for the on-call rotation across regions.";
        let report = analyze_generic(resume).unwrap();
        assert!(!report
            .improvements
            .iter()
            .any(|i| i.contains("weak phrases")));
        assert!(report.strengths.contains(&"Good use of action verbs".to_string()));
    }

    #[test]
    fn test_determinism() {
        let a = analyze_generic(SCENARIO_A).unwrap();
        let b = analyze_generic(SCENARIO_A).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_adding_a_skill_never_lowers_skill_factor() {
        let before = analyze_generic(SCENARIO_A).unwrap();
        let after = analyze_generic(&format!("{SCENARIO_A} Also Kubernetes.")).unwrap();
        assert!(after.breakdown[&Category::Skills] >= before.breakdown[&Category::Skills]);
    }

    #[test]
    fn test_every_factor_within_ceiling() {
        let inputs = [SCENARIO_A, PLAIN_RESUME];
        for input in inputs {
            let report = analyze_generic(input).unwrap();
            assert!(report.overall_score <= 100);
            for (category, score) in &report.breakdown {
                let ceiling = ScoringMode::Generic.ceiling(*category).unwrap();
                assert!(f64::from(*score) <= ceiling, "{category:?} = {score}");
            }
        }
    }

    #[test]
    fn test_short_resume_rejected() {
        let msg = report_errs(analyze_generic("   Rust developer.   "));
        assert!(msg.contains("resume_text"));
    }

    #[test]
    fn test_resume_over_ceiling_rejected() {
        let engine = ScoringEngine::new(EngineLimits {
            min_text_chars: 10,
            max_input_chars: 100,
        });
        let long = "word ".repeat(30);
        let msg = report_errs(engine.analyze_generic(&long, None));
        assert!(msg.contains("too long"));
    }

    #[test]
    fn test_empty_required_skills_rejected() {
        let msg = report_errs(analyze_against_job(SCENARIO_A, &job(&[], &[])));
        assert!(msg.contains("required_skills"));
    }

    #[test]
    fn test_tiny_required_skills_rejected() {
        // "Go" joined is only two characters.
        let msg = report_errs(analyze_against_job(SCENARIO_A, &job(&["Go"], &[])));
        assert!(msg.contains("required_skills"));
        assert!(analyze_against_job(SCENARIO_A, &job(&["Go", "C"], &[])).is_ok());
    }

    #[test]
    fn test_blank_required_skills_rejected() {
        let msg = report_errs(analyze_against_job(SCENARIO_A, &job(&["", "", "", ""], &[])));
        assert!(msg.contains("blank"));

        let msg = report_errs(analyze_against_job(SCENARIO_A, &job(&["React", "  ", "Docker"], &[])));
        assert!(msg.contains("blank"));
    }

    #[test]
    fn test_job_mode_completeness_with_duplicates() {
        let j = job(&["Python", "python", "Docker", "PYTHON", "Rust"], &[]);
        let report = analyze_against_job(SCENARIO_A, &j).unwrap();
        let m = report.job_match.unwrap();
        assert_eq!(m.matched_skills.len() + m.missing_skills.len(), 3);
        assert_eq!(m.matched_skills, vec!["Python"]);
    }

    #[test]
    fn test_job_mode_requirements_and_keywords() {
        let resume = "Frontend engineer who likes to design and build web applications in React \
            for a customer facing team. Email: dev@example.com, phone (555) 123-4567.";
        let j = job(
            &["React", "TypeScript"],
            &["Customer facing web applications", "Kubernetes cluster administration"],
        );
        let report = analyze_against_job(resume, &j).unwrap();
        let m = report.job_match.as_ref().unwrap();
        assert_eq!(m.matched_keywords, vec!["design", "build"]);
        assert!(m.missing_keywords.is_empty());
        assert_eq!(m.matched_requirements, vec!["Customer facing web applications"]);
        assert_eq!(m.missing_requirements, vec!["Kubernetes cluster administration"]);
        // 20 + 25 + 10 + 0 + 5
        assert_eq!(report.overall_score, 60);
        assert_eq!(report.breakdown[&Category::Quality], 5);
        assert!(m.suggestions.last().unwrap().starts_with("Good match"));
    }

    #[test]
    fn test_generic_match_score_from_description() {
        let engine = ScoringEngine::default();
        let report = engine
            .analyze_generic(SCENARIO_A, Some("Python developer wanted"))
            .unwrap();
        // long tokens: python, developer, wanted -> 2/3
        assert_eq!(report.match_score, Some(67));

        let report = engine
            .analyze_generic(SCENARIO_A, Some("   "))
            .unwrap();
        assert_eq!(report.match_score, None);
    }

    #[tokio::test]
    async fn test_rule_based_scorer_delegates_to_engine() {
        let scorer = RuleBasedScorer::default();
        let via_trait = scorer.analyze_generic(SCENARIO_A, None).await.unwrap();
        let direct = analyze_generic(SCENARIO_A).unwrap();
        assert_eq!(via_trait, direct);
        assert_eq!(scorer.backend(), "rules");
    }
}
