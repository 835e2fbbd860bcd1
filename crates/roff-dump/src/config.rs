//! CLI configuration, persisted as JSON.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Global configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Array values printed when `--limit` is not given (0 = all).
    #[serde(default = "default_max_elements")]
    pub max_elements: usize,
    /// Print JSON by default.
    #[serde(default)]
    pub json: bool,
}

fn default_max_elements() -> usize {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_elements: default_max_elements(),
            json: false,
        }
    }
}

impl AppConfig {
    /// `config.json` under the platform config dir, e.g. `~/.config/roff-dump/`.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roff-dump")
            .join("config.json")
    }

    pub fn load_or_default() -> anyhow::Result<Self> {
        Self::load_from(&Self::path())
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("cannot write {}", path.display()))
    }

    /// Update one field from its command-line spelling.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "max_elements" => self.max_elements = value.parse()?,
            "json" => self.json = value.parse()?,
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
        Ok(())
    }
}
