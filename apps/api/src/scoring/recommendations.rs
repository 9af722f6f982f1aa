use std::collections::BTreeMap;

use crate::bank::model::{Pillar, QuestionBank};
use crate::scoring::engine::PillarScore;
use crate::scoring::status::Status;
use crate::scoring::RecommendationError;

/// The authored list for `status`, verbatim and in order.
pub fn recommendations_for(pillar: &Pillar, status: Status) -> &[String] {
    status.select(&pillar.recommendations)
}

/// Same as [`recommendations_for`] for a status coming in as text.
/// Anything other than `red`, `amber` or `green` is rejected.
pub fn recommendations_for_label<'a>(
    pillar: &'a Pillar,
    status: &str,
) -> Result<&'a [String], RecommendationError> {
    let status: Status = status.parse()?;
    Ok(recommendations_for(pillar, status))
}

/// Recommendation lists keyed by pillar id for a set of scored pillars.
pub fn select_for_scores(
    bank: &QuestionBank,
    scores: &[PillarScore],
) -> Result<BTreeMap<String, Vec<String>>, RecommendationError> {
    scores
        .iter()
        .map(|score| {
            let pillar = bank
                .pillar(&score.pillar_id)
                .ok_or_else(|| RecommendationError::UnknownPillar(score.pillar_id.clone()))?;
            Ok((
                score.pillar_id.clone(),
                recommendations_for(pillar, score.status).to_vec(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::model::{Recommendations, ScoringConfig, Thresholds};

    fn pillar() -> Pillar {
        Pillar {
            id: "finance".to_string(),
            name: "Finance".to_string(),
            questions: vec![],
            recommendations: Recommendations {
                red: vec!["Keep monthly records.".to_string(), "Separate accounts.".to_string()],
                amber: vec!["Build a cash forecast.".to_string()],
                green: vec![],
            },
        }
    }

    fn score(pillar_id: &str, status: Status) -> PillarScore {
        PillarScore {
            pillar_id: pillar_id.to_string(),
            pillar_name: pillar_id.to_string(),
            achieved: 0,
            maximum: 6,
            normalized_score: 0,
            status,
        }
    }

    #[test]
    fn test_returns_list_verbatim_in_order() {
        let p = pillar();
        assert_eq!(
            recommendations_for(&p, Status::Red),
            &["Keep monthly records.".to_string(), "Separate accounts.".to_string()]
        );
        assert_eq!(recommendations_for(&p, Status::Amber).len(), 1);
    }

    #[test]
    fn test_gap_in_authored_lists_yields_empty() {
        assert!(recommendations_for(&pillar(), Status::Green).is_empty());
    }

    #[test]
    fn test_label_lookup_rejects_unknown_status() {
        let p = pillar();
        assert_eq!(recommendations_for_label(&p, "amber").unwrap().len(), 1);
        assert_eq!(
            recommendations_for_label(&p, "purple").unwrap_err(),
            RecommendationError::UnknownStatus("purple".to_string())
        );
    }

    #[test]
    fn test_select_for_scores_keys_by_pillar() {
        let bank = QuestionBank {
            pillars: vec![pillar()],
            scoring: ScoringConfig {
                thresholds: Thresholds::default(),
                logic: String::new(),
            },
        };
        let selected = select_for_scores(&bank, &[score("finance", Status::Amber)]).unwrap();
        assert_eq!(selected["finance"], vec!["Build a cash forecast.".to_string()]);

        let err = select_for_scores(&bank, &[score("hr", Status::Red)]).unwrap_err();
        assert_eq!(err, RecommendationError::UnknownPillar("hr".to_string()));
    }
}
