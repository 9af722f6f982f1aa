//! Scoring pass over a validated question bank.
//!
//! Algorithm, per pillar:
//! 1. Every question must have an answer; missing ones fail the whole pass.
//! 2. achieved = Σ submitted scores, each of which must be one of the question's option scores
//! 3. maximum  = Σ max(option score) per question
//! 4. normalized = round(achieved / maximum × 100), or 0 when maximum is 0
//! 5. status from the bank's closed threshold ranges
//!
//! The overall score sums raw achieved and maximum across pillars before normalizing,
//! so pillars with larger maximums weigh proportionally more.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bank::model::{Pillar, QuestionBank, Thresholds};
use crate::scoring::status::{classify, Status};
use crate::scoring::ScoringError;

/// Submitted answers: question id → chosen option score.
pub type Answers = BTreeMap<String, u32>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PillarScore {
    pub pillar_id: String,
    pub pillar_name: String,
    pub achieved: u64,
    pub maximum: u64,
    pub normalized_score: u32,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub achieved: u64,
    pub maximum: u64,
    pub normalized_score: u32,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub pillars: Vec<PillarScore>,
    pub overall: OverallScore,
}

pub fn score_answers(bank: &QuestionBank, answers: &Answers) -> Result<ScoreCard, ScoringError> {
    let unknown: Vec<String> = answers
        .keys()
        .filter(|id| bank.question(id).is_none())
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(ScoringError::UnknownQuestionId {
            question_ids: unknown,
        });
    }

    let thresholds = &bank.scoring.thresholds;
    let pillars = bank
        .pillars
        .iter()
        .map(|pillar| score_pillar(pillar, answers, thresholds))
        .collect::<Result<Vec<_>, _>>()?;

    let achieved: u64 = pillars.iter().map(|p| p.achieved).sum();
    let maximum: u64 = pillars.iter().map(|p| p.maximum).sum();
    let normalized_score = normalize(achieved, maximum);

    Ok(ScoreCard {
        overall: OverallScore {
            achieved,
            maximum,
            normalized_score,
            status: status_for(normalized_score, thresholds)?,
        },
        pillars,
    })
}

fn score_pillar(
    pillar: &Pillar,
    answers: &Answers,
    thresholds: &Thresholds,
) -> Result<PillarScore, ScoringError> {
    let missing: Vec<String> = pillar
        .questions
        .iter()
        .filter(|q| !answers.contains_key(&q.id))
        .map(|q| q.id.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ScoringError::IncompleteAnswers {
            pillar_id: pillar.id.clone(),
            missing,
        });
    }

    let mut achieved = 0u64;
    let mut maximum = 0u64;
    for question in &pillar.questions {
        // presence checked above
        let score = answers[&question.id];
        if !question.accepts(score) {
            return Err(ScoringError::InvalidScoreValue {
                question_id: question.id.clone(),
                score,
                allowed: question.options.iter().map(|o| o.score).collect(),
            });
        }
        achieved += u64::from(score);
        maximum += u64::from(question.max_score());
    }

    let normalized_score = normalize(achieved, maximum);
    Ok(PillarScore {
        pillar_id: pillar.id.clone(),
        pillar_name: pillar.name.clone(),
        achieved,
        maximum,
        normalized_score,
        status: status_for(normalized_score, thresholds)?,
    })
}

/// `round(achieved / maximum × 100)` with halves rounded up, in integer arithmetic.
/// Zero maximum normalizes to 0.
pub fn normalize(achieved: u64, maximum: u64) -> u32 {
    if maximum == 0 {
        return 0;
    }
    let rounded = (achieved * 200 + maximum) / (maximum * 2);
    rounded.min(100) as u32
}

fn status_for(score: u32, thresholds: &Thresholds) -> Result<Status, ScoringError> {
    classify(score, thresholds).ok_or(ScoringError::UnclassifiedScore { score })
}
