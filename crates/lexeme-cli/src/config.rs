use anyhow::{Context, Result};
use lexeme_sheets::{DEFAULT_ENTRY_SHEET_PATTERN, DEFAULT_FILE_NAME_PATTERN, IngestOptions};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. LEXEME_CONFIG environment variable (with tilde expansion)
/// 3. User config directory (`<config_dir>/lexeme/config.toml`)
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(&path.to_string_lossy()));
    }

    if let Ok(env_path) = std::env::var("LEXEME_CONFIG") {
        return Some(expand_tilde(&env_path));
    }

    dirs::config_dir().map(|dir| dir.join("lexeme").join("config.toml"))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Regex tested against sheet names; matches are frequency dictionaries
    pub entry_sheet_pattern: String,
    /// Regex tested against file names during discovery
    pub file_name_pattern: String,
    /// Discovery root; the working directory when unset
    pub search_root: Option<PathBuf>,
    /// Styled entry counts in interactive tables
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry_sheet_pattern: DEFAULT_ENTRY_SHEET_PATTERN.to_string(),
            file_name_pattern: DEFAULT_FILE_NAME_PATTERN.to_string(),
            search_root: None,
            color: true,
        }
    }
}

impl Config {
    /// Load from the resolved path; a missing file means defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Both patterns must compile.
    pub fn validate(&self) -> Result<()> {
        self.ingest_options()?;
        self.file_name_regex()?;
        Ok(())
    }

    pub fn ingest_options(&self) -> Result<IngestOptions> {
        IngestOptions::new(&self.entry_sheet_pattern)
            .with_context(|| format!("entry_sheet_pattern '{}'", self.entry_sheet_pattern))
    }

    pub fn file_name_regex(&self) -> Result<Regex> {
        Regex::new(&self.file_name_pattern)
            .with_context(|| format!("file_name_pattern '{}'", self.file_name_pattern))
    }

    pub fn search_root(&self) -> PathBuf {
        match &self.search_root {
            Some(root) => expand_tilde(&root.to_string_lossy()),
            None => PathBuf::from("."),
        }
    }
}
