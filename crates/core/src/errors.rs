//! Error types for the ScaffWrite core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Conflict resolution errors
// ---------------------------------------------------------------------------

/// Errors surfaced by [`Conflicter::resolve`](crate::conflict::Conflicter::resolve).
///
/// None of these are retried internally; every failure aborts the in-flight
/// call and is the caller's responsibility to handle.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The existence check or content comparison failed at the I/O level
    /// (e.g. permission denied). Propagated unchanged from the collaborator.
    #[error("collision probe failed: {0}")]
    Probe(#[from] std::io::Error),

    /// The interactive chooser was aborted before a choice was made.
    /// Session state is left exactly as it was before the call.
    #[error("conflict prompt cancelled for '{0}'")]
    PromptCancelled(String),

    /// The chooser returned a string outside the fixed six-option menu.
    ///
    /// An unrecognized choice carrying an "all" suffix must never be guessed
    /// into a session-wide flag, so this fails instead of defaulting.
    #[error("unrecognized conflict choice '{0}'")]
    UnrecognizedChoice(String),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
