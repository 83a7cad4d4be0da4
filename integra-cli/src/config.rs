use anyhow::{Context, Result};
use integra_ingest::EngineOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_integra_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Vertical distance under which words share a row
    pub y_tolerance: f64,
    /// Rows closer than this to the header top are still header
    pub header_gap: f64,
    /// Positional dialect: leading words searched for the date
    pub date_search_tokens: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub output_dir: PathBuf,
}

impl Default for EngineSection {
    fn default() -> Self {
        let defaults = EngineOptions::default();
        Self {
            y_tolerance: defaults.y_tolerance,
            header_gap: defaults.header_gap,
            date_search_tokens: defaults.date_search_tokens,
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            y_tolerance: self.engine.y_tolerance,
            header_gap: self.engine.header_gap,
            date_search_tokens: self.engine.date_search_tokens,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_integra_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
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
