//! Output handed to persistence and PDF generation: scores, recommendations and the
//! status legend for the bank that produced them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bank::model::QuestionBank;
use crate::scoring::engine::{score_answers, Answers, OverallScore, PillarScore};
use crate::scoring::recommendations::select_for_scores;
use crate::scoring::status::{legend, StatusBand};
use crate::scoring::ScoringError;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub pillar_scores: Vec<PillarScore>,
    pub overall_score: OverallScore,
    /// pillar id → recommendations for that pillar's status
    pub recommendations: BTreeMap<String, Vec<String>>,
    pub legend: Vec<StatusBand>,
}

pub fn build_report(
    bank: &QuestionBank,
    answers: &Answers,
) -> Result<AssessmentReport, ScoringError> {
    let card = score_answers(bank, answers)?;

    let recommendations = select_for_scores(bank, &card.pillars)?;

    Ok(AssessmentReport {
        pillar_scores: card.pillars,
        overall_score: card.overall,
        recommendations,
        legend: legend(&bank.scoring.thresholds),
    })
}
