//! Loads every industry's question bank once, validates it, and keeps it in memory.
//!
//! Banks come from the JSON files compiled into the binary, or from a directory of
//! `<industry>.json` files when `QUESTION_BANK_DIR` is set. Either way a single bad
//! bank fails the whole load; the service never starts with a partial set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bank::model::{Industry, QuestionBank};
use crate::bank::validation::{validate_bank, ValidationWarning};
use crate::bank::BankError;

const EMBEDDED_BANKS: [(Industry, &str); 9] = [
    (
        Industry::Agriculture,
        include_str!("../../data/questions/agriculture.json"),
    ),
    (
        Industry::Commerce,
        include_str!("../../data/questions/commerce.json"),
    ),
    (
        Industry::Education,
        include_str!("../../data/questions/education.json"),
    ),
    (
        Industry::Finance,
        include_str!("../../data/questions/finance.json"),
    ),
    (
        Industry::Healthcare,
        include_str!("../../data/questions/healthcare.json"),
    ),
    (
        Industry::Manufacturing,
        include_str!("../../data/questions/manufacturing.json"),
    ),
    (Industry::Other, include_str!("../../data/questions/other.json")),
    (
        Industry::Services,
        include_str!("../../data/questions/services.json"),
    ),
    (
        Industry::Technology,
        include_str!("../../data/questions/technology.json"),
    ),
];

/// Where bank JSON is read from at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum BankSource {
    Embedded,
    Directory(PathBuf),
}

/// Validated, read-only question banks keyed by industry.
#[derive(Debug, Clone)]
pub struct QuestionBankRegistry {
    banks: BTreeMap<Industry, QuestionBank>,
    warnings: Vec<(Industry, ValidationWarning)>,
}

impl QuestionBankRegistry {
    pub fn load(source: &BankSource) -> Result<Self, BankError> {
        let mut banks = Vec::with_capacity(EMBEDDED_BANKS.len());
        match source {
            BankSource::Embedded => {
                for (industry, raw) in EMBEDDED_BANKS {
                    banks.push((industry, parse_bank(industry, raw)?));
                }
            }
            BankSource::Directory(dir) => {
                for industry in Industry::ALL {
                    banks.push((industry, read_bank(dir, industry)?));
                }
            }
        }
        Self::from_banks(banks)
    }

    /// Validates each bank and builds the registry. Rejects the first invalid bank.
    pub fn from_banks(
        banks: impl IntoIterator<Item = (Industry, QuestionBank)>,
    ) -> Result<Self, BankError> {
        let mut registry = Self {
            banks: BTreeMap::new(),
            warnings: Vec::new(),
        };

        for (industry, bank) in banks {
            let warnings = validate_bank(industry, &bank)?;
            for warning in &warnings {
                warn!(
                    industry = %industry,
                    pillar = %warning.pillar_id,
                    status = %warning.status,
                    "{}",
                    warning.message
                );
            }
            info!(
                industry = %industry,
                pillars = bank.pillars.len(),
                questions = bank.question_count(),
                "Question bank loaded"
            );
            registry
                .warnings
                .extend(warnings.into_iter().map(|w| (industry, w)));
            registry.banks.insert(industry, bank);
        }

        Ok(registry)
    }

    /// Looks up a bank by its industry key. Unknown keys are an error; falling back
    /// to another bank is the caller's decision.
    pub fn get(&self, industry_key: &str) -> Result<&QuestionBank, BankError> {
        let industry: Industry = industry_key.parse()?;
        self.bank(industry)
            .ok_or_else(|| BankError::UnknownIndustry(industry_key.to_string()))
    }

    pub fn bank(&self, industry: Industry) -> Option<&QuestionBank> {
        self.banks.get(&industry)
    }

    pub fn contains(&self, industry: Industry) -> bool {
        self.banks.contains_key(&industry)
    }

    pub fn industries(&self) -> impl Iterator<Item = (Industry, &QuestionBank)> {
        self.banks.iter().map(|(industry, bank)| (*industry, bank))
    }

    pub fn warnings(&self) -> &[(Industry, ValidationWarning)] {
        &self.warnings
    }
}

fn parse_bank(industry: Industry, raw: &str) -> Result<QuestionBank, BankError> {
    serde_json::from_str(raw).map_err(|source| BankError::Parse { industry, source })
}

fn read_bank(dir: &Path, industry: Industry) -> Result<QuestionBank, BankError> {
    let path = dir.join(format!("{industry}.json"));
    let raw = std::fs::read_to_string(&path).map_err(|source| BankError::Io {
        path: path.clone(),
        source,
    })?;
    info!(industry = %industry, path = %path.display(), "Reading question bank from disk");
    parse_bank(industry, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::engine::score_answers;
    use crate::scoring::status::Status;
    use crate::scoring::Answers;

    fn embedded() -> QuestionBankRegistry {
        QuestionBankRegistry::load(&BankSource::Embedded).unwrap()
    }

    fn other_finance(a: u32, b: u32) -> (u64, u64, u32, Status) {
        let registry = embedded();
        let bank = registry.get("other").unwrap();
        // answer every other pillar with the best option so only finance varies
        let mut answers: Answers = bank
            .questions()
            .map(|q| (q.id.clone(), q.max_score()))
            .collect();
        answers.insert("other_finance_1".to_string(), a);
        answers.insert("other_finance_2".to_string(), b);
        let card = score_answers(bank, &answers).unwrap();
        let finance = card.pillars.iter().find(|p| p.pillar_id == "finance").unwrap();
        (finance.achieved, finance.maximum, finance.normalized_score, finance.status)
    }

    #[test]
    fn test_all_embedded_banks_load_without_warnings() {
        let registry = embedded();
        assert_eq!(registry.industries().count(), Industry::ALL.len());
        assert!(registry.warnings().is_empty());
        for (industry, bank) in registry.industries() {
            assert_eq!(bank.pillars.len(), 9, "{industry}");
            assert_eq!(bank.question_count(), 18, "{industry}");
            assert_eq!(bank.scoring.thresholds.amber, [40, 69]);
        }
    }

    #[test]
    fn test_embedded_option_scores_are_zero_one_three() {
        let registry = embedded();
        for (_, bank) in registry.industries() {
            for q in bank.questions() {
                let scores: Vec<u32> = q.options.iter().map(|o| o.score).collect();
                assert_eq!(scores, vec![0, 1, 3], "{}", q.id);
            }
        }
    }

    #[test]
    fn test_other_finance_scenarios() {
        assert_eq!(other_finance(0, 0), (0, 6, 0, Status::Red));
        assert_eq!(other_finance(1, 3), (4, 6, 67, Status::Amber));
        assert_eq!(other_finance(3, 3), (6, 6, 100, Status::Green));
    }

    #[test]
    fn test_unknown_industry_lookup_fails() {
        let registry = embedded();
        assert!(matches!(
            registry.get("aerospace"),
            Err(BankError::UnknownIndustry(ref k)) if k == "aerospace"
        ));
    }

    #[test]
    fn test_directory_source_reads_every_industry() {
        let dir = tempfile::tempdir().unwrap();
        for (industry, raw) in EMBEDDED_BANKS {
            std::fs::write(dir.path().join(format!("{industry}.json")), raw).unwrap();
        }
        let registry =
            QuestionBankRegistry::load(&BankSource::Directory(dir.path().to_path_buf())).unwrap();
        assert_eq!(registry.industries().count(), 9);
    }

    #[test]
    fn test_directory_source_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("other.json"), EMBEDDED_BANKS[6].1).unwrap();
        let err = QuestionBankRegistry::load(&BankSource::Directory(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, BankError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        for (industry, raw) in EMBEDDED_BANKS {
            let body = if industry == Industry::Commerce {
                r#"{"pillars": [{"id": "finance"}]}"#
            } else {
                raw
            };
            std::fs::write(dir.path().join(format!("{industry}.json")), body).unwrap();
        }
        let err = QuestionBankRegistry::load(&BankSource::Directory(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(
            err,
            BankError::Parse {
                industry: Industry::Commerce,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_question_in_one_bank_fails_the_load() {
        let mut bank: QuestionBank = serde_json::from_str(EMBEDDED_BANKS[6].1).unwrap();
        let duplicate = bank.pillars[0].questions[0].clone();
        bank.pillars[1].questions.push(duplicate);
        let err = QuestionBankRegistry::from_banks([(Industry::Other, bank)]).unwrap_err();
        assert!(matches!(err, BankError::DuplicateQuestionId { ref question_id, .. } if question_id == "other_finance_1"));
    }

    #[test]
    fn test_partial_recommendations_are_kept_as_warnings() {
        let mut bank: QuestionBank = serde_json::from_str(EMBEDDED_BANKS[6].1).unwrap();
        bank.pillars[2].recommendations.amber.clear();
        let registry = QuestionBankRegistry::from_banks([(Industry::Other, bank)]).unwrap();
        assert_eq!(registry.warnings().len(), 1);
        assert_eq!(registry.warnings()[0].1.pillar_id, "sales");
        assert!(registry.contains(Industry::Other));
        assert!(!registry.contains(Industry::Finance));
    }
}
