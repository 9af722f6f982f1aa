use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bank::model::{Recommendations, Thresholds};
use crate::scoring::RecommendationError;

/// Red/amber/green health band of a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Red,
    Amber,
    Green,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Red, Status::Amber, Status::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Red => "red",
            Status::Amber => "amber",
            Status::Green => "green",
        }
    }

    /// Human-readable label shown next to the score.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Red => "Critical",
            Status::Amber => "Needs Improvement",
            Status::Green => "Healthy",
        }
    }

    /// Hex color used by report renderers.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Red => "#EF4444",
            Status::Amber => "#F59E0B",
            Status::Green => "#10B981",
        }
    }

    pub fn range(&self, thresholds: &Thresholds) -> [u32; 2] {
        match self {
            Status::Red => thresholds.red,
            Status::Amber => thresholds.amber,
            Status::Green => thresholds.green,
        }
    }

    pub fn select<'a>(&self, recommendations: &'a Recommendations) -> &'a [String] {
        match self {
            Status::Red => &recommendations.red,
            Status::Amber => &recommendations.amber,
            Status::Green => &recommendations.green,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RecommendationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RecommendationError::UnknownStatus(s.to_string()))
    }
}

/// Finds the closed range containing `score`. `None` only for a threshold table
/// that failed (or skipped) bank validation.
pub fn classify(score: u32, thresholds: &Thresholds) -> Option<Status> {
    Status::ALL.into_iter().find(|status| {
        let [min, max] = status.range(thresholds);
        (min..=max).contains(&score)
    })
}

/// Legend entry for one status band of a bank.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusBand {
    pub status: Status,
    pub label: &'static str,
    pub color: &'static str,
    pub range: [u32; 2],
}

pub fn legend(thresholds: &Thresholds) -> Vec<StatusBand> {
    Status::ALL
        .into_iter()
        .map(|status| StatusBand {
            status,
            label: status.label(),
            color: status.color(),
            range: status.range(thresholds),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_edges() {
        let t = Thresholds::default();
        assert_eq!(classify(0, &t), Some(Status::Red));
        assert_eq!(classify(39, &t), Some(Status::Red));
        assert_eq!(classify(40, &t), Some(Status::Amber));
        assert_eq!(classify(69, &t), Some(Status::Amber));
        assert_eq!(classify(70, &t), Some(Status::Green));
        assert_eq!(classify(100, &t), Some(Status::Green));
    }

    #[test]
    fn test_thresholds_are_read_from_data() {
        let t = Thresholds {
            red: [0, 49],
            amber: [50, 79],
            green: [80, 100],
        };
        assert_eq!(classify(40, &t), Some(Status::Red));
        assert_eq!(classify(70, &t), Some(Status::Amber));
        assert_eq!(classify(80, &t), Some(Status::Green));
    }

    #[test]
    fn test_uncovered_score_is_unclassified() {
        let t = Thresholds {
            red: [0, 10],
            amber: [20, 30],
            green: [40, 100],
        };
        assert_eq!(classify(15, &t), None);
    }

    #[test]
    fn test_status_parse_rejects_unknown_labels() {
        assert_eq!("amber".parse::<Status>().unwrap(), Status::Amber);
        let err = "yellow".parse::<Status>().unwrap_err();
        assert!(matches!(err, RecommendationError::UnknownStatus(ref s) if s == "yellow"));
        assert!("Green".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Amber).unwrap(), "\"amber\"");
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(Status::Red.label(), "Critical");
        assert_eq!(Status::Amber.color(), "#F59E0B");
        let bands = legend(&Thresholds::default());
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[2].range, [70, 100]);
        assert_eq!(bands[2].label, "Healthy");
    }
}
