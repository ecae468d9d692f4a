//! Axum route handlers for the ATS scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::job::JobSpec;
use crate::scoring::normalizer::normalize;
use crate::scoring::report::ScoreReport;
use crate::scoring::skills::extract_skills;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job: JobSpec,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: ScoreReport,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/analyze
///
/// Generic resume-quality analysis. An optional free-text job description adds `match_score`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let analysis = state
        .scorer
        .analyze_generic(&request.resume_text, request.job_description.as_deref())
        .await?;

    Ok(Json(AnalysisResponse {
        success: true,
        analysis,
    }))
}

/// POST /api/v1/ats/match
///
/// Job-comparison analysis against an explicit job specification.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let analysis = state
        .scorer
        .analyze_against_job(&request.resume_text, &request.job)
        .await?;

    Ok(Json(AnalysisResponse {
        success: true,
        analysis,
    }))
}

/// POST /api/v1/ats/skills
///
/// Runs the skill extractor alone.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<SkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    state.config.limits().check_ceiling("text", &request.text)?;

    let skills = extract_skills(&normalize(&request.text));
    Ok(Json(SkillsResponse { skills }))
}
