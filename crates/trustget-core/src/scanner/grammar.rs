//! Line grammars for checksum files.
//!
//! Two forms are recognised, tried in this order:
//!
//! - `<hex><ws>[*]<filename>` (GNU coreutils `sha256sum` output, text or binary mode)
//! - `<filename>:<ws><hex>`
//!
//! Blank lines and `#` comments are skipped; anything else that matches
//! neither form is dropped.

use regex::Regex;
use std::sync::OnceLock;

use super::types::ChecksumEntry;
use crate::checksum::HashAlgorithm;

struct LineGrammar {
    pattern: &'static str,
    hash_group: usize,
    name_group: usize,
}

const GRAMMARS: [LineGrammar; 2] = [
    LineGrammar {
        pattern: r"^([a-fA-F0-9]+)\s+\*?(.+)$",
        hash_group: 1,
        name_group: 2,
    },
    LineGrammar {
        pattern: r"^(.+):\s*([a-fA-F0-9]+)$",
        hash_group: 2,
        name_group: 1,
    },
];

fn compiled() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    CELL.get_or_init(|| {
        GRAMMARS
            .iter()
            .map(|g| Regex::new(g.pattern).expect("static checksum grammar"))
            .collect()
    })
}

/// Parses checksum file content into entries, keeping 1-based line numbers.
pub fn parse(content: &str) -> Vec<ChecksumEntry> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

fn parse_line(line: &str, line_no: usize) -> Option<ChecksumEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    GRAMMARS.iter().zip(compiled()).find_map(|(grammar, re)| {
        let caps = re.captures(line)?;
        let hash = caps.get(grammar.hash_group)?.as_str().to_ascii_lowercase();
        let filename = caps.get(grammar.name_group)?.as_str().trim();
        if filename.is_empty() {
            return None;
        }
        Some(ChecksumEntry {
            algorithm: HashAlgorithm::detect(&hash),
            hash_value: hash,
            filename: filename.to_string(),
            source_line: line_no,
        })
    })
}
