//! Persistent `config.toml` handling for the CLI.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use trustget_core::TrustgetConfig;

/// `$XDG_CONFIG_HOME/trustget/config.toml` (parent directory created).
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("trustget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, creating a default file if none exists.
pub fn load_or_init_at(path: &Path) -> Result<TrustgetConfig> {
    if !path.exists() {
        let default_cfg = TrustgetConfig::default();
        write_config(path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg = TrustgetConfig::from_toml_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Overwrite `path` with the default configuration.
pub fn reset_at(path: &Path) -> Result<TrustgetConfig> {
    let default_cfg = TrustgetConfig::default();
    write_config(path, &default_cfg)?;
    tracing::info!("reset config at {}", path.display());
    Ok(default_cfg)
}

fn write_config(path: &Path, cfg: &TrustgetConfig) -> Result<()> {
    let toml = cfg.to_toml_string()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
