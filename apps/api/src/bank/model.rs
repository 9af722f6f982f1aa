use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bank::BankError;

/// The industries a question bank is authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Agriculture,
    Commerce,
    Education,
    Finance,
    Healthcare,
    Manufacturing,
    Other,
    Services,
    Technology,
}

impl Industry {
    pub const ALL: [Industry; 9] = [
        Industry::Agriculture,
        Industry::Commerce,
        Industry::Education,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Manufacturing,
        Industry::Other,
        Industry::Services,
        Industry::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Agriculture => "agriculture",
            Industry::Commerce => "commerce",
            Industry::Education => "education",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Manufacturing => "manufacturing",
            Industry::Other => "other",
            Industry::Services => "services",
            Industry::Technology => "technology",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = BankError;

    /// Industry keys are matched exactly after trimming; `"Finance"` is not `finance`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Industry::ALL
            .into_iter()
            .find(|industry| industry.as_str() == key)
            .ok_or_else(|| BankError::UnknownIndustry(s.to_string()))
    }
}

/// One industry's complete questionnaire. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionBank {
    pub pillars: Vec<Pillar>,
    pub scoring: ScoringConfig,
}

impl QuestionBank {
    pub fn pillar(&self, pillar_id: &str) -> Option<&Pillar> {
        self.pillars.iter().find(|p| p.id == pillar_id)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.pillars.iter().flat_map(|p| p.questions.iter())
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == question_id)
    }

    pub fn question_count(&self) -> usize {
        self.pillars.iter().map(|p| p.questions.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pillar {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub recommendations: Recommendations,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Highest score any option of this question can contribute.
    pub fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }

    pub fn accepts(&self, score: u32) -> bool {
        self.options.iter().any(|o| o.score == score)
    }
}

/// A selectable answer. Negative or fractional scores are rejected when the JSON is parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerOption {
    pub label: String,
    pub score: u32,
}

/// Authored advice per status. A missing key deserializes to an empty list, which
/// validation reports as a warning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    #[serde(default)]
    pub red: Vec<String>,
    #[serde(default)]
    pub amber: Vec<String>,
    #[serde(default)]
    pub green: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    pub thresholds: Thresholds,
    #[serde(default)]
    pub logic: String,
}

/// Closed `[min, max]` ranges of normalized score per status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thresholds {
    pub red: [u32; 2],
    pub amber: [u32; 2],
    pub green: [u32; 2],
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            red: [0, 39],
            amber: [40, 69],
            green: [70, 100],
        }
    }
}
