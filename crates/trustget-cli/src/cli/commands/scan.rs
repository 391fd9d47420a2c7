//! `trustget scan` – list checksum sources published for a URL.

use anyhow::Result;
use trustget_core::{Scanner, TrustgetConfig};

use crate::cli::{exit, output};

pub fn run_scan(cfg: &TrustgetConfig, url: &str, file: Option<&str>, json: bool) -> Result<i32> {
    let scanner = Scanner::from_config(cfg);
    let result = scanner.scan(url, file);

    if json {
        output::print_json(&result)?;
    } else {
        print!("{}", output::render_scan(&result));
    }
    Ok(if result.is_empty() { exit::FAILURE } else { exit::OK })
}
