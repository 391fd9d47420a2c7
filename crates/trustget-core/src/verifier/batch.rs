//! Batch verification input and aggregate result.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::outcome::{VerificationOutcome, VerificationStatus};
use crate::scanner::ChecksumEntry;

/// What to check one batch file against.
#[derive(Debug, Clone)]
pub enum BatchItem {
    /// Raw hex digest; algorithm inferred from its length.
    Hash(String),
    Entry(ChecksumEntry),
    /// Explicitly bypassed; reported as `SKIPPED`.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchVerificationResult {
    /// One outcome per item, in submission order.
    pub results: Vec<VerificationOutcome>,
    pub total: usize,
    pub verified: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchVerificationResult {
    pub(crate) fn push(&mut self, outcome: VerificationOutcome) {
        match outcome.status {
            VerificationStatus::Verified => self.verified += 1,
            VerificationStatus::Skipped => self.skipped += 1,
            _ => self.failed += 1,
        }
        self.results.push(outcome);
    }

    /// Percentage of items verified; 0 for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.verified as f64 / self.total as f64 * 100.0
    }
}

impl Serialize for BatchVerificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BatchVerificationResult", 6)?;
        s.serialize_field("results", &self.results)?;
        s.serialize_field("total", &self.total)?;
        s.serialize_field("verified", &self.verified)?;
        s.serialize_field("failed", &self.failed)?;
        s.serialize_field("skipped", &self.skipped)?;
        s.serialize_field("success_rate", &self.success_rate())?;
        s.end()
    }
}
