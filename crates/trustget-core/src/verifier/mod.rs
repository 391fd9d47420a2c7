//! Hash and signature verification of local files.
//!
//! Every operation returns a [`VerificationOutcome`]; failures are reported
//! through its status and `error` message, never as `Err`.

mod batch;
mod outcome;

pub use batch::{BatchItem, BatchVerificationResult};
pub use outcome::{VerificationOutcome, VerificationStatus};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::{digest_path, HashAlgorithm};
use crate::config::TrustgetConfig;
use crate::scanner::{self, ChecksumEntry, Scanner};
use crate::signature::{GpgVerifier, SignatureVerifier};

/// Detached signature extensions probed next to the file, in order.
const SIGNATURE_EXTENSIONS: [&str; 3] = [".asc", ".sig", ".gpg"];

/// Sums files looked for in the file's directory after `<file>.<ext>` siblings.
const LOCAL_SUMS_FILES: [&str; 4] = ["SHA256SUMS", "SHA512SUMS", "MD5SUMS", "checksums.txt"];

pub struct Verifier {
    scanner: Scanner,
    signatures: Box<dyn SignatureVerifier>,
}

impl Verifier {
    pub fn new(scanner: Scanner, signatures: Box<dyn SignatureVerifier>) -> Self {
        Self { scanner, signatures }
    }

    pub fn from_config(config: &TrustgetConfig) -> Self {
        Self::new(Scanner::from_config(config), Box::new(GpgVerifier::new(&config.gpg)))
    }

    /// Compares the digest of `file` with `expected` (hex, any case).
    ///
    /// Without `algorithm` it is inferred from the length of `expected`.
    pub fn verify_hash(&self, file: &Path, expected: &str, algorithm: Option<&str>) -> VerificationOutcome {
        if !file.exists() {
            return VerificationOutcome::failed(
                VerificationStatus::NotFound,
                file,
                format!("file not found: {}", file.display()),
            );
        }
        let expected = expected.trim();
        let algorithm = match algorithm {
            Some(name) => match name.parse::<HashAlgorithm>() {
                Ok(a) => a,
                Err(e) => return VerificationOutcome::failed(VerificationStatus::Error, file, e.to_string()),
            },
            None => match HashAlgorithm::detect(expected) {
                Some(a) => a,
                None => {
                    return VerificationOutcome::failed(
                        VerificationStatus::Error,
                        file,
                        "could not detect hash algorithm",
                    )
                }
            },
        };
        self.compare(file, expected, algorithm)
    }

    fn compare(&self, file: &Path, expected: &str, algorithm: HashAlgorithm) -> VerificationOutcome {
        let actual = match digest_path(file, algorithm) {
            Ok(hex) => hex,
            Err(e) => {
                return VerificationOutcome::failed(
                    VerificationStatus::Error,
                    file,
                    format!("failed to compute hash: {e:#}"),
                )
            }
        };
        let expected = expected.to_ascii_lowercase();
        let status = if actual.eq_ignore_ascii_case(&expected) {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Mismatch
        };
        tracing::info!(file = %file.display(), %algorithm, %status, "hash checked");
        VerificationOutcome {
            algorithm: Some(algorithm),
            expected_hash: Some(expected),
            actual_hash: Some(actual.to_ascii_lowercase()),
            ..VerificationOutcome::new(status, file)
        }
    }

    /// [`verify_hash`](Self::verify_hash) against a parsed entry; provenance is `<entry file>:<line>`.
    pub fn verify_with_entry(&self, file: &Path, entry: &ChecksumEntry) -> VerificationOutcome {
        self.verify_hash(file, &entry.hash_value, entry.algorithm.map(HashAlgorithm::as_str))
            .with_provenance(format!("{}:{}", entry.filename, entry.source_line))
    }

    /// Verifies `file` against the entry naming it in a local checksum file.
    ///
    /// If the checksum file holds exactly one entry, that entry is used even
    /// when its filename differs from `file`'s (provided its algorithm equals
    /// `algorithm` when one is given).
    pub fn verify_with_checksum_file(
        &self,
        file: &Path,
        checksum_file: &Path,
        algorithm: Option<&str>,
    ) -> VerificationOutcome {
        if !checksum_file.exists() {
            return VerificationOutcome::failed(
                VerificationStatus::NotFound,
                file,
                format!("checksum file not found: {}", checksum_file.display()),
            );
        }
        let content = match fs::read_to_string(checksum_file) {
            Ok(c) => c,
            Err(e) => {
                return VerificationOutcome::failed(
                    VerificationStatus::Error,
                    file,
                    format!("failed to read checksum file {}: {e}", checksum_file.display()),
                )
            }
        };

        let entries = scanner::parse(&content);
        let name = file_name(file);
        let entry = match entries.iter().find(|e| e.matches(&name)) {
            Some(e) => e,
            None if entries.len() == 1
                && algorithm.map_or(true, |a| a.trim().eq_ignore_ascii_case(entries[0].algorithm_name())) =>
            {
                tracing::warn!(
                    file = %file.display(),
                    checksum_file = %checksum_file.display(),
                    listed = %entries[0].filename,
                    "single-entry checksum file used for a differently named file"
                );
                &entries[0]
            }
            None => {
                return VerificationOutcome::failed(
                    VerificationStatus::NotFound,
                    file,
                    format!("no checksum entry for {name} in {}", checksum_file.display()),
                )
            }
        };

        self.verify_with_entry(file, entry)
            .with_provenance(format!("{}:{}", checksum_file.display(), entry.source_line))
    }

    /// Looks for local sibling checksum files first, then scans `source_url`.
    pub fn verify_auto(&self, file: &Path, source_url: Option<&str>) -> VerificationOutcome {
        if !file.exists() {
            return VerificationOutcome::failed(
                VerificationStatus::NotFound,
                file,
                format!("file not found: {}", file.display()),
            );
        }
        let name = file_name(file);

        for candidate in local_candidates(file, &name) {
            if !candidate.is_file() {
                continue;
            }
            let outcome = self.verify_with_checksum_file(file, &candidate, None);
            if outcome.status != VerificationStatus::NotFound {
                return outcome;
            }
            tracing::debug!(candidate = %candidate.display(), "local checksum file has no entry");
        }

        if let Some(url) = source_url {
            let scan = self.scanner.scan(url, Some(&name));
            if let Some((source, entry)) = scan.resolve(&name) {
                return self
                    .verify_with_entry(file, entry)
                    .with_provenance(format!("{}:{}", source.origin, entry.source_line));
            }
        }

        VerificationOutcome::failed(VerificationStatus::NotFound, file, "no checksum source found")
    }

    /// Checks a detached signature; without `signature_file`, `<file>.asc`,
    /// `<file>.sig` and `<file>.gpg` are tried in that order.
    pub fn verify_gpg(&self, file: &Path, signature_file: Option<&Path>) -> VerificationOutcome {
        if !file.exists() {
            return VerificationOutcome::failed(
                VerificationStatus::NotFound,
                file,
                format!("file not found: {}", file.display()),
            );
        }
        let signature = match signature_file {
            Some(p) => Some(p.to_path_buf()).filter(|p| p.exists()),
            None => SIGNATURE_EXTENSIONS
                .iter()
                .map(|ext| with_suffix(file, ext))
                .find(|p| p.exists()),
        };
        let Some(signature) = signature else {
            return VerificationOutcome::failed(VerificationStatus::NotFound, file, "no signature file found");
        };

        match self.signatures.verify_detached(file, &signature) {
            Ok(check) => {
                let status = if check.valid {
                    VerificationStatus::Verified
                } else {
                    VerificationStatus::Mismatch
                };
                tracing::info!(file = %file.display(), key = ?check.key_id, %status, "signature checked");
                VerificationOutcome {
                    provenance: Some(signature.display().to_string()),
                    error: (!check.valid).then(|| "signature verification failed".to_string()),
                    signature_verified: check.valid,
                    signature_key_id: check.key_id,
                    signature_key_status: Some(if check.valid { "valid" } else { "invalid" }.to_string()),
                    ..VerificationOutcome::new(status, file)
                }
            }
            Err(e) => VerificationOutcome::failed(
                VerificationStatus::Error,
                file,
                format!("signature verification error: {e}"),
            ),
        }
    }

    /// Verifies items strictly in order; `progress(index, total)` (1-based)
    /// runs before each item.
    pub fn verify_batch(
        &self,
        items: &[(PathBuf, BatchItem)],
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> BatchVerificationResult {
        let mut result = BatchVerificationResult {
            total: items.len(),
            ..Default::default()
        };
        for (idx, (file, item)) in items.iter().enumerate() {
            if let Some(cb) = progress.as_deref_mut() {
                cb(idx + 1, items.len());
            }
            let outcome = match item {
                BatchItem::Hash(hex) => self.verify_hash(file, hex, None),
                BatchItem::Entry(entry) => self.verify_with_entry(file, entry),
                BatchItem::Skip => VerificationOutcome::new(VerificationStatus::Skipped, file),
            };
            result.push(outcome);
        }
        tracing::info!(
            total = result.total,
            verified = result.verified,
            failed = result.failed,
            skipped = result.skipped,
            "batch verified"
        );
        result
    }

    /// Accepts `"<hash>"` or `"<hash>  <filename>"` as pasted from a sums file;
    /// only the hash is used.
    pub fn verify_checksum_string(&self, file: &Path, checksum: &str) -> VerificationOutcome {
        match checksum.split_whitespace().next() {
            Some(hash) => self.verify_hash(file, hash, None),
            None => VerificationOutcome::failed(VerificationStatus::Error, file, "invalid checksum string"),
        }
    }
}

fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<path><suffix>`, appending to the full filename (`a.tar.gz` -> `a.tar.gz.asc`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

fn local_candidates(file: &Path, name: &str) -> Vec<PathBuf> {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    [".sha256", ".sha512", ".md5"]
        .iter()
        .map(|ext| dir.join(format!("{name}{ext}")))
        .chain(LOCAL_SUMS_FILES.iter().map(|f| dir.join(f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StubFetcher;
    use crate::signature::testing::FixedVerdict;
    use crate::signature::SignatureCheck;
    use std::sync::Arc;

    const HELLO_MD5: &str = "b1946ac92492d2347c6235b4d2611184";
    const HELLO_SHA1: &str = "f572d396fae9206628714fb2ce00f72e94f2258f";
    const HELLO_SHA256: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";
    const OTHER_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn verifier_with(stub: &Arc<StubFetcher>, verdict: Option<SignatureCheck>) -> Verifier {
        Verifier::new(Scanner::new(Box::new(Arc::clone(stub))), Box::new(FixedVerdict(verdict)))
    }

    fn verifier() -> Verifier {
        verifier_with(&Arc::new(StubFetcher::new()), None)
    }

    fn hello(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, b"hello\n").unwrap();
        p
    }

    #[test]
    fn verify_hash_detects_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let v = verifier();
        for (hex, alg) in [
            (HELLO_MD5, HashAlgorithm::Md5),
            (HELLO_SHA1, HashAlgorithm::Sha1),
            (HELLO_SHA256, HashAlgorithm::Sha256),
        ] {
            let o = v.verify_hash(&f, hex, None);
            assert_eq!(o.status, VerificationStatus::Verified, "{alg}");
            assert_eq!(o.algorithm, Some(alg));
            assert_eq!(o.expected_hash, o.actual_hash);
        }
    }

    #[test]
    fn verify_hash_reflexive() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join("blob.bin");
        fs::write(&f, (0..=255u8).cycle().take(200_000).collect::<Vec<_>>()).unwrap();
        let v = verifier();
        for alg in HashAlgorithm::ALL {
            let hex = digest_path(&f, alg).unwrap();
            assert!(v.verify_hash(&f, &hex, None).is_verified(), "{alg}");
        }
    }

    #[test]
    fn verify_hash_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let mixed: String = HELLO_SHA256
            .chars()
            .enumerate()
            .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
            .collect();
        let o = verifier().verify_hash(&f, &format!(" {mixed}\n"), Some("SHA256"));
        assert_eq!(o.status, VerificationStatus::Verified);
        assert_eq!(o.expected_hash.as_deref(), Some(HELLO_SHA256));
    }

    #[test]
    fn verify_hash_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let o = verifier().verify_hash(&f, OTHER_SHA256, None);
        assert_eq!(o.status, VerificationStatus::Mismatch);
        assert_eq!(o.expected_hash.as_deref(), Some(OTHER_SHA256));
        assert_eq!(o.actual_hash.as_deref(), Some(HELLO_SHA256));
    }

    #[test]
    fn verify_hash_error_paths() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let v = verifier();

        let missing = v.verify_hash(&dir.path().join("nope"), HELLO_SHA256, None);
        assert_eq!(missing.status, VerificationStatus::NotFound);

        let undetectable = v.verify_hash(&f, "abc123", None);
        assert_eq!(undetectable.status, VerificationStatus::Error);
        assert_eq!(undetectable.error.as_deref(), Some("could not detect hash algorithm"));

        let unsupported = v.verify_hash(&f, HELLO_SHA256, Some("blake3"));
        assert_eq!(unsupported.status, VerificationStatus::Error);
        assert!(unsupported.error.unwrap().contains("blake3"));

        // exists, but cannot be read as a file
        let unreadable = v.verify_hash(dir.path(), HELLO_SHA256, None);
        assert_eq!(unreadable.status, VerificationStatus::Error);
        assert!(unreadable.actual_hash.is_none());
        assert!(unreadable.error.unwrap().starts_with("failed to compute hash"));
    }

    #[test]
    fn verify_with_entry_sets_provenance() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let entry = scanner::parse(&format!("# sums\n{HELLO_SHA256}  hello.txt"))
            .pop()
            .unwrap();
        let o = verifier().verify_with_entry(&f, &entry);
        assert!(o.is_verified());
        assert_eq!(o.provenance.as_deref(), Some("hello.txt:2"));
    }

    #[test]
    fn checksum_file_matching_entry() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "Hello.TXT");
        let sums = dir.path().join("SHA256SUMS");
        fs::write(&sums, format!("{OTHER_SHA256}  other.bin\n{HELLO_SHA256}  hello.txt\n")).unwrap();
        let o = verifier().verify_with_checksum_file(&f, &sums, None);
        assert!(o.is_verified());
        assert_eq!(o.provenance, Some(format!("{}:2", sums.display())));
    }

    #[test]
    fn checksum_file_single_entry_leniency() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let sums = dir.path().join("release.sha256");
        fs::write(&sums, format!("{HELLO_SHA256}  totally-different-name.tar.gz\n")).unwrap();
        let v = verifier();
        assert!(v.verify_with_checksum_file(&f, &sums, None).is_verified());
        assert!(v.verify_with_checksum_file(&f, &sums, Some("sha256")).is_verified());
        assert_eq!(
            v.verify_with_checksum_file(&f, &sums, Some("md5")).status,
            VerificationStatus::NotFound
        );
    }

    #[test]
    fn checksum_file_no_match_among_many() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let sums = dir.path().join("SHA256SUMS");
        fs::write(&sums, format!("{OTHER_SHA256}  a\n{OTHER_SHA256}  b\n")).unwrap();
        let v = verifier();
        assert_eq!(v.verify_with_checksum_file(&f, &sums, None).status, VerificationStatus::NotFound);
        assert_eq!(
            v.verify_with_checksum_file(&f, &dir.path().join("MISSING"), None).status,
            VerificationStatus::NotFound
        );
    }

    #[test]
    fn verify_auto_prefers_local_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        fs::write(dir.path().join("MD5SUMS"), format!("{HELLO_MD5}  hello.txt\n")).unwrap();
        fs::write(dir.path().join("hello.txt.sha256"), format!("{HELLO_SHA256}  hello.txt\n")).unwrap();
        let stub = Arc::new(StubFetcher::new());
        let o = verifier_with(&stub, None).verify_auto(&f, Some("https://example.com/hello.txt"));
        assert!(o.is_verified());
        assert_eq!(o.algorithm, Some(HashAlgorithm::Sha256));
        assert!(stub.requested().is_empty());
    }

    #[test]
    fn verify_auto_skips_sums_without_entry() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        fs::write(dir.path().join("SHA256SUMS"), format!("{OTHER_SHA256}  a\n{OTHER_SHA256}  b\n")).unwrap();
        fs::write(dir.path().join("checksums.txt"), format!("hello.txt: {HELLO_MD5}\n")).unwrap();
        let o = verifier().verify_auto(&f, None);
        assert!(o.is_verified());
        assert_eq!(o.algorithm, Some(HashAlgorithm::Md5));
    }

    #[test]
    fn verify_auto_falls_back_to_scan() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let stub = Arc::new(StubFetcher::new().text(
            "https://example.com/dl/hello.txt.sha256",
            &format!("{HELLO_SHA256}  hello.txt\n"),
        ));
        let o = verifier_with(&stub, None).verify_auto(&f, Some("https://example.com/dl/hello.txt"));
        assert!(o.is_verified());
        assert_eq!(o.provenance.as_deref(), Some("https://example.com/dl/hello.txt.sha256:1"));
    }

    #[test]
    fn verify_auto_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let v = verifier();
        assert_eq!(v.verify_auto(&f, None).status, VerificationStatus::NotFound);
        assert_eq!(
            v.verify_auto(&f, Some("https://example.com/hello.txt")).status,
            VerificationStatus::NotFound
        );
    }

    #[test]
    fn gpg_probes_signature_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "app.tar.gz");
        fs::write(dir.path().join("app.tar.gz.sig"), b"sig").unwrap();
        let good = SignatureCheck {
            valid: true,
            key_id: Some("ABCDEF0123456789".into()),
        };
        let o = verifier_with(&Arc::new(StubFetcher::new()), Some(good)).verify_gpg(&f, None);
        assert_eq!(o.status, VerificationStatus::Verified);
        assert!(o.signature_verified);
        assert_eq!(o.signature_key_id.as_deref(), Some("ABCDEF0123456789"));
        assert_eq!(o.signature_key_status.as_deref(), Some("valid"));
        assert!(o.provenance.unwrap().ends_with("app.tar.gz.sig"));
    }

    #[test]
    fn gpg_invalid_is_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "app.tar.gz");
        let sig = dir.path().join("detached.asc");
        fs::write(&sig, b"sig").unwrap();
        let bad = SignatureCheck {
            valid: false,
            key_id: Some("1111".into()),
        };
        let o = verifier_with(&Arc::new(StubFetcher::new()), Some(bad)).verify_gpg(&f, Some(&sig));
        assert_eq!(o.status, VerificationStatus::Mismatch);
        assert!(!o.signature_verified);
        assert_eq!(o.signature_key_id.as_deref(), Some("1111"));
        assert_eq!(o.signature_key_status.as_deref(), Some("invalid"));
    }

    #[test]
    fn gpg_missing_signature_and_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "app.tar.gz");
        let v = verifier();
        assert_eq!(v.verify_gpg(&f, None).status, VerificationStatus::NotFound);
        fs::write(dir.path().join("app.tar.gz.asc"), b"sig").unwrap();
        let o = v.verify_gpg(&f, None);
        assert_eq!(o.status, VerificationStatus::Error);
        assert!(o.error.unwrap().contains("no public key"));
    }

    #[test]
    fn batch_in_order_with_progress() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let entry = scanner::parse(&format!("{HELLO_SHA1}  hello.txt")).remove(0);
        let items = vec![
            (f.clone(), BatchItem::Hash(HELLO_SHA256.into())),
            (f.clone(), BatchItem::Hash(OTHER_SHA256.into())),
            (f.clone(), BatchItem::Skip),
            (f.clone(), BatchItem::Entry(entry)),
            (dir.path().join("missing"), BatchItem::Hash(HELLO_MD5.into())),
        ];
        let mut calls = Vec::new();
        let mut record = |i: usize, n: usize| calls.push((i, n));
        let result = verifier().verify_batch(&items, Some(&mut record));
        assert_eq!(calls, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
        let statuses: Vec<_> = result.results.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                VerificationStatus::Verified,
                VerificationStatus::Mismatch,
                VerificationStatus::Skipped,
                VerificationStatus::Verified,
                VerificationStatus::NotFound,
            ]
        );
        assert_eq!((result.total, result.verified, result.failed, result.skipped), (5, 2, 2, 1));
        assert!((result.success_rate() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn empty_batch() {
        let result = verifier().verify_batch(&[], None);
        assert_eq!(result.total, 0);
        assert_eq!(result.success_rate(), 0.0);
    }

    #[test]
    fn checksum_string_forms() {
        let dir = tempfile::tempdir().unwrap();
        let f = hello(&dir, "hello.txt");
        let v = verifier();
        assert!(v.verify_checksum_string(&f, HELLO_SHA256).is_verified());
        assert!(v.verify_checksum_string(&f, &format!("{HELLO_SHA256}  hello.txt\n")).is_verified());
        assert_eq!(v.verify_checksum_string(&f, "   ").status, VerificationStatus::Error);
    }
}
