//! GnuPG-backed verifier using the machine-readable `--status-fd` output.

use std::path::Path;
use std::process::Command;

use super::{SignatureCheck, SignatureError, SignatureVerifier};
use crate::config::GpgConfig;

const STATUS_PREFIX: &str = "[GNUPG:] ";

pub struct GpgVerifier {
    program: String,
    homedir: Option<std::path::PathBuf>,
}

impl GpgVerifier {
    pub fn new(config: &GpgConfig) -> Self {
        Self {
            program: config.program.clone(),
            homedir: config.homedir.clone(),
        }
    }
}

impl SignatureVerifier for GpgVerifier {
    fn verify_detached(&self, file: &Path, signature: &Path) -> Result<SignatureCheck, SignatureError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["--batch", "--no-tty", "--status-fd", "1"]);
        if let Some(home) = &self.homedir {
            cmd.arg("--homedir").arg(home);
        }
        cmd.arg("--verify").arg(signature).arg(file);

        let output = cmd.output().map_err(|source| SignatureError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        tracing::debug!(
            program = %self.program,
            signature = %signature.display(),
            exit = ?output.status.code(),
            "signature tool finished"
        );
        interpret_status(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Reads the `[GNUPG:]` status lines and derives a verdict.
///
/// A definite good/bad keyword wins over error keywords; without either,
/// the signature is unverifiable.
fn interpret_status(status: &str) -> Result<SignatureCheck, SignatureError> {
    let mut valid: Option<bool> = None;
    let mut key_id: Option<String> = None;
    let mut failure: Option<String> = None;

    for line in status.lines() {
        let Some(rest) = line.trim().strip_prefix(STATUS_PREFIX) else {
            continue;
        };
        let mut parts = rest.split_whitespace();
        let keyword = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::to_string);
        match keyword {
            "GOODSIG" => {
                valid.get_or_insert(true);
                key_id = key_id.or(arg);
            }
            // fingerprint is more specific than the long key id
            "VALIDSIG" => {
                valid.get_or_insert(true);
                if arg.is_some() {
                    key_id = arg;
                }
            }
            "BADSIG" | "EXPSIG" | "EXPKEYSIG" | "REVKEYSIG" => {
                valid = Some(false);
                key_id = key_id.or(arg);
            }
            "ERRSIG" => {
                key_id = key_id.or(arg);
                failure.get_or_insert_with(|| "signature could not be checked".to_string());
            }
            "NO_PUBKEY" => {
                failure = Some(format!(
                    "public key {} not available",
                    arg.as_deref().unwrap_or("?")
                ));
            }
            _ => {}
        }
    }

    match valid {
        Some(valid) => Ok(SignatureCheck { valid, key_id }),
        None => Err(SignatureError::Unverifiable(
            failure.unwrap_or_else(|| "no signature status reported".to_string()),
        )),
    }
}
