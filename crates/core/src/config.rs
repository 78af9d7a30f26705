//! Configuration for ScaffWrite apply runs.
//!
//! Loaded from a TOML file. Everything has a default, so an absent config
//! file is equivalent to `ApplyConfig::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::writer::DEFAULT_BACKUP_SUFFIX;

// ---------------------------------------------------------------------------
// Conflict mode
// ---------------------------------------------------------------------------

/// What to do when a target file exists with different content.
///
/// Every mode except `Prompt` is a bulk mode: it pre-answers the question for
/// the whole run and the chooser is never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConflictMode {
    /// Ask interactively per conflicting file.
    #[default]
    Prompt,
    /// Replace every conflicting file.
    Overwrite,
    /// Back up then replace every conflicting file.
    Backup,
    /// Leave every conflicting file untouched.
    Skip,
}

impl ConflictMode {
    /// Map the mode onto the engine's three constructor flags
    /// `(overwrite_all, backup_all, skip_all)`.
    pub fn bulk_flags(&self) -> (bool, bool, bool) {
        match self {
            Self::Prompt => (false, false, false),
            Self::Overwrite => (true, false, false),
            Self::Backup => (false, true, false),
            Self::Skip => (false, false, true),
        }
    }
}

impl std::fmt::Display for ConflictMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prompt => write!(f, "prompt"),
            Self::Overwrite => write!(f, "overwrite"),
            Self::Backup => write!(f, "backup"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

/// Top-level configuration for apply runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplyConfig {
    /// Conflict handling settings.
    #[serde(default)]
    pub apply: ApplySection,

    /// Candidate filtering and display options.
    #[serde(default)]
    pub options: OptionsSection,
}

/// The `[apply]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplySection {
    /// Default conflict handling when no CLI flag overrides it.
    #[serde(default)]
    pub on_conflict: ConflictMode,

    /// Suffix appended to a file's name when backing it up.
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

impl Default for ApplySection {
    fn default() -> Self {
        Self {
            on_conflict: ConflictMode::default(),
            backup_suffix: default_backup_suffix(),
        }
    }
}

fn default_backup_suffix() -> String {
    DEFAULT_BACKUP_SUFFIX.into()
}

/// The `[options]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsSection {
    /// Glob patterns for candidates to drop before conflict resolution.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Show a unified diff of on-disk vs. proposed content above the prompt.
    #[serde(default = "default_true")]
    pub show_diff: bool,
}

impl Default for OptionsSection {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            show_diff: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

impl ApplyConfig {
    /// Load and validate a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&raw).map_err(|err| ConfigError::ParseError(err.to_string()))?;
        config.validate()?;

        info!(path = %path.display(), on_conflict = %config.apply.on_conflict, "loaded configuration");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check invariants not expressible in the type system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.apply.backup_suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "apply.backup_suffix".into(),
                detail: "must not be empty (the backup would overwrite the original)".into(),
            });
        }
        Ok(())
    }
}
