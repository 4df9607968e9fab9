use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slipline_core::StatementProfile;
use slipline_export::OutputFormat;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_slipline_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub parser: ParserSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Used when neither --format nor the output extension decides
    pub format: OutputFormat,
    /// Prefix CSV output with a UTF-8 byte order mark
    pub utf8_bom: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            utf8_bom: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ParserSection {
    /// Statement profile TOML; the built-in KBank profile when unset
    pub profile: Option<PathBuf>,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_slipline_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Read a statement profile. Keys left out keep their KBank defaults.
pub fn load_profile(path: &Path) -> Result<StatementProfile> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let profile: StatementProfile =
        toml::from_str(&s).with_context(|| format!("parse profile {}", path.display()))?;
    Ok(profile)
}

pub fn profile_to_toml(profile: &StatementProfile) -> Result<String> {
    toml::to_string_pretty(profile).context("serialize profile")
}
