//! Filename classification into checksum/signature kinds.
//!
//! Both tables are ordered and evaluated top to bottom; the first match wins.
//! Matching ignores case.

use super::types::ChecksumKind;

enum Pattern {
    Suffix(&'static str),
    Exact(&'static str),
}

impl Pattern {
    fn matches(&self, lower: &str) -> bool {
        match self {
            Pattern::Suffix(s) => lower.ends_with(s),
            Pattern::Exact(s) => lower == *s,
        }
    }
}

// Patterns are stored lowercase.
const RULES: [(Pattern, ChecksumKind); 13] = [
    (Pattern::Suffix(".sha256"), ChecksumKind::Sha256),
    (Pattern::Suffix(".sha512"), ChecksumKind::Sha512),
    (Pattern::Suffix(".sha1"), ChecksumKind::Sha1),
    (Pattern::Suffix(".md5"), ChecksumKind::Md5),
    (Pattern::Suffix(".asc"), ChecksumKind::Signature),
    (Pattern::Suffix(".sig"), ChecksumKind::Signature),
    (Pattern::Exact("sha256sums"), ChecksumKind::Sha256),
    (Pattern::Exact("sha512sums"), ChecksumKind::Sha512),
    (Pattern::Exact("sha1sums"), ChecksumKind::Sha1),
    (Pattern::Exact("md5sums"), ChecksumKind::Md5),
    // BLAKE2b sums share the 128-hex-digit shape
    (Pattern::Exact("b2sums"), ChecksumKind::Sha512),
    (Pattern::Exact("checksums.txt"), ChecksumKind::Generic),
    // also covers `CHECKSUMS`
    (Pattern::Exact("checksums"), ChecksumKind::Generic),
];

enum Skip {
    Suffix(&'static str),
    OnlyDots,
    Prefix(&'static str),
}

const SKIP: [Skip; 4] = [
    Skip::Suffix(".asc.sha256"),
    Skip::Suffix(".sig.sha256"),
    Skip::OnlyDots,
    Skip::Prefix("#"),
];

/// Kind of integrity source named `filename`, or `None` if it is not one.
pub fn classify(filename: &str) -> Option<ChecksumKind> {
    let lower = filename.to_lowercase();
    RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(&lower))
        .map(|(_, kind)| *kind)
}

/// Names filtered out before classification: checksums of signatures,
/// directory navigation and comment-like listing entries.
pub fn should_skip(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    SKIP.iter().any(|rule| match rule {
        Skip::Suffix(s) => lower.ends_with(s),
        Skip::OnlyDots => !lower.is_empty() && lower.chars().all(|c| c == '.'),
        Skip::Prefix(p) => lower.starts_with(p),
    })
}
