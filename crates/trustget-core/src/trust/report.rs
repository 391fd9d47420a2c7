//! Trust report and risk classification.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::factor::TrustFactor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// <40 critical, 40-59 high, 60-79 medium, 80+ low.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => RiskLevel::Critical,
            40..=59 => RiskLevel::High,
            60..=79 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-function form of [`RiskLevel::from_score`].
pub fn risk_from_score(score: u8) -> RiskLevel {
    RiskLevel::from_score(score)
}

/// Outcome of one analysis. `score` is the clamped sum of factor points and
/// `risk` is always derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustReport {
    pub url: String,
    pub score: u8,
    pub risk: RiskLevel,
    pub factors: Vec<TrustFactor>,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl TrustReport {
    pub(crate) fn new(url: &str, factors: Vec<TrustFactor>, metadata: BTreeMap<String, serde_json::Value>) -> Self {
        // i64 so that extreme weight overrides cannot overflow
        let total: i64 = factors.iter().map(|f| i64::from(f.points())).sum();
        let score = total.clamp(0, 100) as u8;
        Self {
            url: url.to_string(),
            score,
            risk: RiskLevel::from_score(score),
            factors,
            metadata,
            timestamp: Utc::now(),
        }
    }

    /// e.g. `MEDIUM (65/100)`.
    pub fn summary(&self) -> String {
        format!("{} ({}/100)", self.risk, self.score)
    }

    /// Applied factors with a positive weight.
    pub fn positive_factors(&self) -> impl Iterator<Item = &TrustFactor> {
        self.factors.iter().filter(|f| f.applied && f.weight > 0)
    }

    /// Applied factors with a negative weight.
    pub fn negative_factors(&self) -> impl Iterator<Item = &TrustFactor> {
        self.factors.iter().filter(|f| f.applied && f.weight < 0)
    }

    /// Sum of positive weights over the factors in this report.
    pub fn max_score(&self) -> i64 {
        self.factors
            .iter()
            .filter(|f| f.weight > 0)
            .map(|f| i64::from(f.weight))
            .sum()
    }

    pub fn factor(&self, name: &str) -> Option<&TrustFactor> {
        self.factors.iter().find(|f| f.name() == name)
    }
}

impl Serialize for TrustReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TrustReport", 7)?;
        s.serialize_field("url", &self.url)?;
        s.serialize_field("score", &self.score)?;
        s.serialize_field("risk", &self.risk)?;
        s.serialize_field("factors", &self.factors)?;
        s.serialize_field("metadata", &self.metadata)?;
        s.serialize_field("timestamp", &self.timestamp)?;
        s.serialize_field("summary", &self.summary())?;
        s.end()
    }
}
