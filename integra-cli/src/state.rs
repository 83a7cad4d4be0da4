use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// State directory: `$INTEGRA_HOME`, else `~/.integra`.
pub fn integra_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("INTEGRA_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".integra"))
}

pub fn ensure_integra_home() -> Result<PathBuf> {
    let dir = integra_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn clients_path() -> Result<PathBuf> {
    Ok(ensure_integra_home()?.join("clients.json"))
}

pub fn rules_path(client_id: u32) -> Result<PathBuf> {
    Ok(ensure_integra_home()?.join("rules").join(format!("{client_id}.csv")))
}
