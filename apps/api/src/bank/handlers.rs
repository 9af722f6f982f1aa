//! Axum route handlers for browsing question banks.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::bank::{Industry, QuestionBank};
use crate::errors::AppError;
use crate::scoring::recommendations::recommendations_for_label;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IndustrySummary {
    pub industry: Industry,
    pub pillars: usize,
    pub questions: usize,
}

#[derive(Debug, Serialize)]
pub struct IndustriesResponse {
    pub industries: Vec<IndustrySummary>,
    pub fallback_industry: Industry,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub requested_industry: String,
    pub resolved_industry: Industry,
    pub fell_back: bool,
    pub bank: QuestionBank,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub industry: String,
    pub pillar_id: String,
    pub status: String,
    pub recommendations: Vec<String>,
}

/// GET /api/v1/industries
pub async fn handle_list_industries(State(state): State<AppState>) -> Json<IndustriesResponse> {
    let industries = state
        .banks
        .industries()
        .map(|(industry, bank)| IndustrySummary {
            industry,
            pillars: bank.pillars.len(),
            questions: bank.question_count(),
        })
        .collect();

    Json(IndustriesResponse {
        industries,
        fallback_industry: state.config.fallback_industry,
    })
}

/// GET /api/v1/questions/:industry
///
/// Unknown industries are answered with the fallback bank; `fell_back` says so.
pub async fn handle_get_questions(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let resolved = state
        .resolve_bank(&industry)
        .ok_or_else(|| AppError::NotFound(format!("No question bank for '{industry}'")))?;

    Ok(Json(QuestionsResponse {
        requested_industry: resolved.requested,
        resolved_industry: resolved.industry,
        fell_back: resolved.fell_back,
        bank: resolved.bank.clone(),
    }))
}

/// GET /api/v1/questions/:industry/pillars/:pillar/recommendations/:status
///
/// Strict lookup: no industry fallback, and the status must be red, amber or green.
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Path((industry, pillar_id, status)): Path<(String, String, String)>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let bank = state.banks.get(&industry)?;
    let pillar = bank.pillar(&pillar_id).ok_or_else(|| {
        AppError::NotFound(format!("Pillar '{pillar_id}' not found in {industry} bank"))
    })?;
    let recommendations = recommendations_for_label(pillar, &status)?.to_vec();

    Ok(Json(RecommendationsResponse {
        industry,
        pillar_id,
        status,
        recommendations,
    }))
}
