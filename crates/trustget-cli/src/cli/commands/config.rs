//! `trustget config` – show or reset the configuration file.

use anyhow::Result;
use std::path::Path;

use crate::cli::{config, exit};

pub fn run_config(path: &Path, reset: bool) -> Result<i32> {
    let cfg = if reset {
        let cfg = config::reset_at(path)?;
        println!("Configuration reset to defaults");
        cfg
    } else {
        config::load_or_init_at(path)?
    };
    println!("# {}", path.display());
    print!("{}", cfg.to_toml_string()?);
    Ok(exit::OK)
}
