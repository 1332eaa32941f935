//! Persisted configuration document access.
//!
//! The document lives in the host's home directory and is owned by the
//! host application; this store only reads it and writes it back
//! crash-safely via the temp→fsync→rename pattern.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const LOOM_DIR: &str = ".loom";
pub const CONFIG_FILE: &str = "loom.json";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store rooted at `~/.loom/loom.json`. `None` when no home directory
    /// can be resolved.
    pub fn from_home() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(LOOM_DIR).join(CONFIG_FILE),
        })
    }

    /// Store at an explicit path, for tests and local tooling.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file is `None`, not an error.
    pub fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read config file: {}", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", self.path.display()))?;

        Ok(Some(config))
    }

    /// Persist the document as pretty-printed JSON with a trailing newline.
    pub fn write(&self, config: &Value) -> Result<()> {
        let mut content =
            serde_json::to_vec_pretty(config).context("failed to serialize config")?;
        content.push(b'\n');

        atomic_write(&self.path, &content)
            .with_context(|| format!("failed to write config file: {}", self.path.display()))
    }
}

/// Write via a temp file in the target directory, fsync, then rename, so
/// the document is either fully replaced or untouched on crash.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "config path has no parent directory")
    })?;
    fs::create_dir_all(parent)?;

    let temp_path = path.with_file_name(format!(
        ".{}.tmp.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id()
    ));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    #[cfg(unix)]
    {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
