//! Structural contract checks for a question bank.
//!
//! Fatal problems (empty ids, duplicate ids, pillars without questions, questions
//! without options, a threshold table that does not partition 0..=100) return a
//! `BankError`. An empty recommendation list only produces a warning.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::bank::model::{Industry, QuestionBank, Thresholds};
use crate::bank::BankError;
use crate::scoring::status::Status;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidationWarning {
    pub pillar_id: String,
    pub status: Status,
    pub message: String,
}

pub fn validate_bank(
    industry: Industry,
    bank: &QuestionBank,
) -> Result<Vec<ValidationWarning>, BankError> {
    let malformed = |reason: String| BankError::MalformedBank { industry, reason };

    if bank.pillars.is_empty() {
        return Err(malformed("bank has no pillars".to_string()));
    }

    validate_thresholds(&bank.scoring.thresholds).map_err(&malformed)?;

    let mut warnings = Vec::new();
    let mut pillar_ids = HashSet::new();
    // question id -> owning pillar id
    let mut question_owners: HashMap<&str, &str> = HashMap::new();

    for (index, pillar) in bank.pillars.iter().enumerate() {
        if pillar.id.trim().is_empty() {
            return Err(malformed(format!("pillar #{index} has an empty id")));
        }
        if !pillar_ids.insert(pillar.id.as_str()) {
            return Err(BankError::DuplicatePillarId {
                industry,
                pillar_id: pillar.id.clone(),
            });
        }
        if pillar.questions.is_empty() {
            return Err(malformed(format!("pillar '{}' has no questions", pillar.id)));
        }

        for question in &pillar.questions {
            if question.id.trim().is_empty() {
                return Err(malformed(format!(
                    "pillar '{}' has a question with an empty id",
                    pillar.id
                )));
            }
            if let Some(first) = question_owners.insert(question.id.as_str(), pillar.id.as_str())
            {
                return Err(BankError::DuplicateQuestionId {
                    industry,
                    question_id: question.id.clone(),
                    first_pillar: first.to_string(),
                    second_pillar: pillar.id.clone(),
                });
            }
            if question.options.is_empty() {
                return Err(malformed(format!("question '{}' has no options", question.id)));
            }
        }

        for status in Status::ALL {
            let list = status.select(&pillar.recommendations);
            if list.is_empty() {
                warnings.push(ValidationWarning {
                    pillar_id: pillar.id.clone(),
                    status,
                    message: format!(
                        "pillar '{}' has no '{}' recommendations",
                        pillar.id, status
                    ),
                });
            }
        }
    }

    Ok(warnings)
}

/// Every integer score in 0..=100 must land in exactly one closed range.
fn validate_thresholds(thresholds: &Thresholds) -> Result<(), String> {
    for status in Status::ALL {
        let [min, max] = status.range(thresholds);
        if min > max {
            return Err(format!("{status} threshold [{min}, {max}] is inverted"));
        }
        if max > 100 {
            return Err(format!("{status} threshold [{min}, {max}] exceeds 100"));
        }
    }

    for score in 0..=100u32 {
        let matching: Vec<Status> = Status::ALL
            .into_iter()
            .filter(|s| {
                let [min, max] = s.range(thresholds);
                (min..=max).contains(&score)
            })
            .collect();
        match matching.len() {
            1 => {}
            0 => return Err(format!("score {score} is not covered by any threshold")),
            _ => {
                return Err(format!(
                    "score {score} is covered by more than one threshold ({})",
                    matching
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        }
    }

    Ok(())
}
