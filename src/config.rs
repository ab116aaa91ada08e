use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH: &str = "~/.config/pwbrowser/config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub use_dmenu: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "http://127.0.0.1:5000".to_owned(),
            timeout_secs: 30,
            use_dmenu: false,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn read_if_found(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(&path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into())
    }
}

pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Config file path {} is invalid", path))?;
    Ok(Path::new(expanded.as_ref()).to_owned())
}

/// Read the config file, falling back to defaults when it does not exist.
pub fn read(path: &str) -> Result<Config> {
    let path = expand_path(path)?;
    match read_if_found(&path)? {
        Some(c) => serde_json::from_str(&c)
            .with_context(|| format!("Error de-serialising config file {:?}", path)),
        None => Ok(Config::default()),
    }
}
