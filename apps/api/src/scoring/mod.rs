// Assessment scoring: per-pillar and overall scores, status bands, recommendations.
// Scoring itself is a pure function of (QuestionBank, Answers); handlers wrap it for HTTP.

pub mod engine;
pub mod handlers;
pub mod recommendations;
pub mod report;
pub mod status;

use thiserror::Error;

pub use engine::Answers;
pub use report::{build_report, AssessmentReport};

/// Request-time rejections. A submission is never scored with guessed values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringError {
    #[error("Pillar '{pillar_id}' has unanswered questions: {}", .missing.join(", "))]
    IncompleteAnswers {
        pillar_id: String,
        missing: Vec<String>,
    },

    #[error("Answers reference unknown question ids: {}", .question_ids.join(", "))]
    UnknownQuestionId { question_ids: Vec<String> },

    #[error("Score {score} is not a valid option for question '{question_id}' (allowed: {allowed:?})")]
    InvalidScoreValue {
        question_id: String,
        score: u32,
        allowed: Vec<u32>,
    },

    #[error("Normalized score {score} is outside every status threshold")]
    UnclassifiedScore { score: u32 },

    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecommendationError {
    #[error("Unknown status '{0}' (expected red, amber or green)")]
    UnknownStatus(String),

    #[error("Pillar '{0}' does not exist in this bank")]
    UnknownPillar(String),
}
