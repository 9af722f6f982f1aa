use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::bank::BankError;
use crate::scoring::{RecommendationError, ScoringError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rejected submission: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Recommendation error: {0}")]
    Recommendation(#[from] RecommendationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<BankError> for AppError {
    fn from(e: BankError) -> Self {
        match e {
            BankError::UnknownIndustry(_) => AppError::NotFound(e.to_string()),
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Scoring(e) => match e {
                ScoringError::IncompleteAnswers { .. } => "INCOMPLETE_ANSWERS",
                ScoringError::UnknownQuestionId { .. } => "UNKNOWN_QUESTION_ID",
                ScoringError::InvalidScoreValue { .. } => "INVALID_SCORE_VALUE",
                ScoringError::UnclassifiedScore { .. } | ScoringError::Recommendation(_) => {
                    "SCORING_ERROR"
                }
            },
            AppError::Recommendation(RecommendationError::UnknownStatus(_)) => "UNKNOWN_STATUS",
            AppError::Recommendation(RecommendationError::UnknownPillar(_)) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // Both of these mean the bank itself is inconsistent, not the submission.
            AppError::Scoring(e @ ScoringError::UnclassifiedScore { .. })
            | AppError::Scoring(e @ ScoringError::Recommendation(_)) => {
                tracing::error!("Scoring invariant violated: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The assessment could not be scored".to_string(),
                )
            }
            AppError::Scoring(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Recommendation(e @ RecommendationError::UnknownStatus(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Recommendation(e @ RecommendationError::UnknownPillar(_)) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
