// Question banks: per-industry pillars, questions, options and recommendations.
// Loaded and validated once at startup; read-only afterwards.

pub mod handlers;
pub mod model;
pub mod registry;
pub mod validation;

use std::path::PathBuf;

use thiserror::Error;

pub use model::{Industry, QuestionBank};
pub use registry::QuestionBankRegistry;

/// Load-time failures. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("Unknown industry '{0}'")]
    UnknownIndustry(String),

    #[error("Duplicate pillar id '{pillar_id}' in {industry} bank")]
    DuplicatePillarId { industry: Industry, pillar_id: String },

    #[error(
        "Duplicate question id '{question_id}' in {industry} bank (pillars '{first_pillar}' and '{second_pillar}')"
    )]
    DuplicateQuestionId {
        industry: Industry,
        question_id: String,
        first_pillar: String,
        second_pillar: String,
    },

    #[error("Malformed {industry} bank: {reason}")]
    MalformedBank { industry: Industry, reason: String },

    #[error("Failed to parse {industry} bank: {source}")]
    Parse {
        industry: Industry,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read question bank file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
