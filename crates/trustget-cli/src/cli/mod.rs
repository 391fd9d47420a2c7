//! CLI for TrustGet.

mod commands;
mod config;
mod exit;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use trustget_core::TrustgetConfig;

use commands::{
    run_check, run_completions, run_config, run_info, run_man, run_scan, run_trust, run_verify,
    CheckArgs, VerifyArgs,
};

/// Top-level CLI for TrustGet.
#[derive(Debug, Parser)]
#[command(name = "trustget", version)]
#[command(about = "TrustGet: checksum discovery, verification and trust scoring for downloads", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/trustget/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Score a URL before downloading it.
    Trust {
        /// HTTP/HTTPS URL of the artifact.
        url: String,

        /// Print the report as JSON.
        #[arg(long, short = 'j')]
        json: bool,

        /// Exit with status 1 when the score is below N (overrides trust.min_score).
        #[arg(long, value_name = "N")]
        min_score: Option<u8>,
    },

    /// Verify a local file against a hash, a checksum file, a remote source or a signature.
    Verify {
        /// Path to the file.
        file: PathBuf,

        /// Expected hash, or a "<hash>  <filename>" line.
        #[arg(long, value_name = "HASH", conflicts_with = "checksum_file")]
        checksum: Option<String>,

        /// Hash algorithm (md5, sha1, sha256, sha512); detected from the hash length if omitted.
        #[arg(long, short = 'a', value_name = "ALGO")]
        algorithm: Option<String>,

        /// Local checksum file listing the file.
        #[arg(long, value_name = "PATH")]
        checksum_file: Option<PathBuf>,

        /// URL the file was downloaded from (enables remote checksum discovery).
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Also check a detached signature next to the file.
        #[arg(long)]
        gpg: bool,

        /// Detached signature file (implies --gpg).
        #[arg(long, value_name = "PATH")]
        signature: Option<PathBuf>,

        /// Print the outcome as JSON.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Discover checksum files published for a URL.
    Scan {
        /// Artifact URL or directory URL (ending in '/').
        url: String,

        /// Filename to look up when URL is a directory.
        #[arg(long, value_name = "NAME")]
        file: Option<String>,

        /// Print the scan result as JSON.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Show release metadata and the trust report for a URL.
    Info {
        /// HTTP/HTTPS URL of the artifact.
        url: String,

        /// Print as JSON.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Verify an already-downloaded file and score its source URL.
    Check {
        /// Path to the downloaded file.
        file: PathBuf,

        /// URL the file was downloaded from.
        #[arg(long, value_name = "URL")]
        url: String,

        /// Redirect hop observed during the download (repeatable, in order).
        #[arg(long = "redirect", value_name = "URL")]
        redirects: Vec<String>,

        /// Print as JSON.
        #[arg(long, short = 'j')]
        json: bool,

        /// Exit with status 1 when the score is below N (overrides trust.min_score).
        #[arg(long, value_name = "N")]
        min_score: Option<u8>,
    },

    /// Show the configuration (and its path), or reset it to defaults.
    Config {
        /// Overwrite the config file with defaults.
        #[arg(long)]
        reset: bool,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    /// Parses arguments, loads config and runs the command; returns the process exit code.
    pub fn run_from_args() -> Result<i32> {
        let Cli { config, command } = Cli::parse();
        let config_path = || match &config {
            Some(p) => Ok(p.clone()),
            None => config::config_path(),
        };
        let load = || -> Result<TrustgetConfig> {
            let cfg = config::load_or_init_at(&config_path()?)?;
            tracing::debug!("loaded config: {:?}", cfg);
            Ok(cfg)
        };

        match command {
            CliCommand::Trust { url, json, min_score } => run_trust(&load()?, &url, json, min_score),
            CliCommand::Verify {
                file,
                checksum,
                algorithm,
                checksum_file,
                url,
                gpg,
                signature,
                json,
            } => run_verify(
                &load()?,
                &VerifyArgs {
                    file,
                    checksum,
                    algorithm,
                    checksum_file,
                    url,
                    gpg,
                    signature,
                    json,
                },
            ),
            CliCommand::Scan { url, file, json } => run_scan(&load()?, &url, file.as_deref(), json),
            CliCommand::Info { url, json } => run_info(&load()?, &url, json),
            CliCommand::Check {
                file,
                url,
                redirects,
                json,
                min_score,
            } => run_check(
                &load()?,
                &CheckArgs {
                    file,
                    url,
                    redirects,
                    json,
                    min_score,
                },
            ),
            CliCommand::Config { reset } => run_config(&config_path()?, reset),
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man(),
        }
    }
}

#[cfg(test)]
mod tests;
