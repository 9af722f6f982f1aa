//! Axum route handlers for the Assessment API.

use std::collections::btree_map::Entry;
use std::fmt;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::bank::Industry;
use crate::errors::AppError;
use crate::scoring::{build_report, Answers, AssessmentReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub industry: String,
    pub answers: AnswerPayload,
}

/// Answers arrive either as `{questionId: score}` or as the form list
/// `[{questionId, answer}]`. The map form keeps every entry in document order so a
/// repeated key is seen, not silently overwritten.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AnswerPayload {
    Map(#[serde(deserialize_with = "map_entries")] Vec<(String, u32)>),
    List(Vec<SubmittedAnswer>),
}

fn map_entries<'de, D>(deserializer: D) -> Result<Vec<(String, u32)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, u32)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of question id to score")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, u32>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer: u32,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub assessment_id: Uuid,
    pub scored_at: DateTime<Utc>,
    pub requested_industry: String,
    pub resolved_industry: Industry,
    pub fell_back: bool,
    pub report: AssessmentReport,
}

impl AnswerPayload {
    /// Gathers the payload into the answer map. A question answered twice is rejected
    /// rather than letting the last value win.
    pub fn into_answers(self) -> Result<Answers, AppError> {
        let entries = match self {
            AnswerPayload::Map(entries) => entries,
            AnswerPayload::List(list) => list
                .into_iter()
                .map(|a| (a.question_id, a.answer))
                .collect(),
        };

        let mut answers = Answers::new();
        for (question_id, answer) in entries {
            match answers.entry(question_id) {
                Entry::Vacant(slot) => {
                    slot.insert(answer);
                }
                Entry::Occupied(slot) => {
                    return Err(AppError::Validation(format!(
                        "Question '{}' answered more than once",
                        slot.key()
                    )));
                }
            }
        }

        if answers.is_empty() {
            return Err(AppError::Validation("answers cannot be empty".to_string()));
        }
        Ok(answers)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessments/score
///
/// Scores a submission against the industry's bank (or the fallback bank) and returns
/// pillar scores, the overall score and per-pillar recommendations.
/// Incomplete, unknown or out-of-range answers are rejected with 422.
pub async fn handle_score_assessment(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let answers = request.answers.into_answers()?;
    let resolved = state.resolve_bank(&request.industry).ok_or_else(|| {
        AppError::NotFound(format!("No question bank for '{}'", request.industry))
    })?;

    debug!(industry = %resolved.industry, answers = answers.len(), "Scoring assessment");
    let report = build_report(resolved.bank, &answers)?;

    let assessment_id = Uuid::new_v4();
    info!(
        %assessment_id,
        industry = %resolved.industry,
        overall = report.overall_score.normalized_score,
        status = %report.overall_score.status,
        "Assessment scored"
    );

    Ok(Json(ScoreResponse {
        assessment_id,
        scored_at: Utc::now(),
        requested_industry: resolved.requested,
        resolved_industry: resolved.industry,
        fell_back: resolved.fell_back,
        report,
    }))
}
