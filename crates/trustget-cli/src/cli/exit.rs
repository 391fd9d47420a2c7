//! Process exit codes: 0 ok, 1 failure or high risk, 2 mismatch or critical risk.

use trustget_core::{RiskLevel, TrustReport, VerificationOutcome, VerificationStatus};

pub const OK: i32 = 0;
pub const FAILURE: i32 = 1;
pub const MISMATCH: i32 = 2;

/// Exit code for a trust report, honouring an optional minimum score.
pub fn for_report(report: &TrustReport, min_score: Option<u8>) -> i32 {
    match report.risk {
        RiskLevel::Critical => MISMATCH,
        RiskLevel::High => FAILURE,
        _ if min_score.is_some_and(|min| report.score < min) => FAILURE,
        _ => OK,
    }
}

/// Worst exit code over the outcomes; any mismatch wins.
pub fn for_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a VerificationOutcome>) -> i32 {
    outcomes.into_iter().fold(OK, |code, o| {
        let this = match o.status {
            VerificationStatus::Verified => OK,
            VerificationStatus::Mismatch => MISMATCH,
            _ => FAILURE,
        };
        code.max(this)
    })
}
