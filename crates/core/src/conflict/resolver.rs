//! The conflict-resolution decision engine.
//!
//! [`Conflicter`] decides, for each file a generator wants to write, what to
//! do when the target path is already occupied: create, leave identical
//! content alone, overwrite, back up then overwrite, or skip. A session-wide
//! "apply to all" decision, once made, short-circuits every later call.
//!
//! The engine owns no I/O. Existence checks and content comparison come from
//! a [`CollisionProbe`], the interactive menu from an [`ActionPrompt`]; both
//! are traits so the CLI wires real collaborators and tests wire scripted
//! ones.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::ResolveError;

use super::choice::{Choice, MenuAction, DEFAULT_CHOICE, MENU_CHOICES};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The five-way outcome of conflict resolution for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No file occupies the target path; write it fresh.
    Create,
    /// The target exists with identical content; nothing to write.
    Identical,
    /// Replace the existing file.
    Overwrite,
    /// Preserve the existing file under a backup name, then replace it.
    Backup,
    /// Leave the existing file untouched; do not write.
    Skip,
}

impl Action {
    /// Short label for per-file logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Identical => "identical",
            Self::Overwrite => "overwrite",
            Self::Backup => "backup",
            Self::Skip => "skip",
        }
    }

    /// `true` if this action results in the proposed content landing on disk.
    pub fn writes_file(&self) -> bool {
        matches!(self, Self::Create | Self::Overwrite | Self::Backup)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A file a generator intends to write: target path plus proposed content.
///
/// Borrowed by [`Conflicter::resolve`] for the duration of one call and never
/// retained.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub filepath: PathBuf,
    pub contents: Vec<u8>,
}

impl CandidateFile {
    pub fn new(filepath: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filepath: filepath.into(),
            contents: contents.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Reports on the state of a target path relative to proposed content.
///
/// I/O failures (e.g. permission denied) propagate to the caller of
/// `resolve` unchanged; the engine neither retries nor swallows them.
#[allow(async_fn_in_trait)]
pub trait CollisionProbe {
    /// Whether a file already occupies `path`.
    async fn exists(&self, path: &Path) -> std::io::Result<bool>;

    /// Whether `contents` differs from what is on disk at `path`.
    ///
    /// Only called for paths that exist. Synchronous: the comparison reads
    /// local state, not the network.
    fn has_conflict(&self, path: &Path, contents: &[u8]) -> std::io::Result<bool>;
}

/// Presents a single-choice menu and returns the selected literal.
///
/// Implementations must return exactly one of the strings in `choices`.
/// Cancellation (interrupt, closed terminal) surfaces as
/// [`ResolveError::PromptCancelled`].
#[allow(async_fn_in_trait)]
pub trait ActionPrompt {
    async fn choose(
        &self,
        message: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<String, ResolveError>;
}

// Forwarding impls so a collaborator can be lent to the engine while the
// caller keeps a handle to it (e.g. for staging prompt context).
impl<T: CollisionProbe> CollisionProbe for &T {
    async fn exists(&self, path: &Path) -> std::io::Result<bool> {
        (**self).exists(path).await
    }

    fn has_conflict(&self, path: &Path, contents: &[u8]) -> std::io::Result<bool> {
        (**self).has_conflict(path, contents)
    }
}

impl<T: ActionPrompt> ActionPrompt for &T {
    async fn choose(
        &self,
        message: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<String, ResolveError> {
        (**self).choose(message, choices, default).await
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The in-memory record of which bulk mode, if any, is active.
///
/// Mutated only when the user picks an "all" option; never reset for the
/// lifetime of the owning [`Conflicter`]. Deliberately private: the state is
/// observable only through the behavior of later `resolve` calls.
#[derive(Debug, Clone, Copy, Default)]
struct SessionState {
    overwrite_all: bool,
    backup_all: bool,
    skip_all: bool,
}

impl SessionState {
    fn bulk_active(&self) -> bool {
        self.overwrite_all || self.backup_all || self.skip_all
    }
}

// ---------------------------------------------------------------------------
// Conflicter
// ---------------------------------------------------------------------------

/// Stateful conflict-resolution engine, one instance per generator run.
///
/// `resolve` takes `&mut self`, so overlapping calls on one instance are
/// ruled out at compile time; an in-flight "all" decision can never race a
/// concurrent bulk-branch read.
pub struct Conflicter<P, C> {
    probe: P,
    prompt: C,
    state: SessionState,
}

impl<P: CollisionProbe, C: ActionPrompt> Conflicter<P, C> {
    /// A fully interactive engine: every conflicting file prompts.
    pub fn new(probe: P, prompt: C) -> Self {
        Self::with_bulk_mode(probe, prompt, false, false, false)
    }

    /// An engine seeded with a non-interactive bulk mode, e.g. from a
    /// `--force` flag. The flags are normally mutually exclusive; see
    /// `resolve` for the tie-break when they are not.
    pub fn with_bulk_mode(
        probe: P,
        prompt: C,
        overwrite_all: bool,
        backup_all: bool,
        skip_all: bool,
    ) -> Self {
        Self {
            probe,
            prompt,
            state: SessionState {
                overwrite_all,
                backup_all,
                skip_all,
            },
        }
    }

    /// Decide what to do with one candidate file.
    ///
    /// An absent target is always `Create`. An occupied target resolves
    /// through the active bulk mode if any, through `Identical` when content
    /// matches, or through the interactive menu.
    ///
    /// When more than one bulk flag is set the tie-break is fixed at
    /// skip > backup > overwrite: the least destructive flag wins.
    pub async fn resolve(&mut self, file: &CandidateFile) -> Result<Action, ResolveError> {
        if !self.probe.exists(&file.filepath).await? {
            debug!(path = %file.filepath.display(), "target absent");
            return Ok(Action::Create);
        }

        if !self.state.bulk_active() {
            if !self.probe.has_conflict(&file.filepath, &file.contents)? {
                debug!(path = %file.filepath.display(), "content identical");
                return Ok(Action::Identical);
            }
            return self.ask(file).await;
        }

        let action = if self.state.skip_all {
            Action::Skip
        } else if self.state.backup_all {
            Action::Backup
        } else {
            Action::Overwrite
        };
        debug!(path = %file.filepath.display(), action = %action, "bulk mode");
        Ok(action)
    }

    /// Interactive sub-protocol: prompt, parse, record any "all" decision,
    /// return the single-file action.
    ///
    /// State is mutated only after the response parses; a cancelled or
    /// malformed prompt leaves the session exactly as it was.
    async fn ask(&mut self, file: &CandidateFile) -> Result<Action, ResolveError> {
        let message = format!("Overwrite {}?", file.filepath.display());
        let raw = self
            .prompt
            .choose(&message, &MENU_CHOICES, DEFAULT_CHOICE)
            .await?;
        let choice = Choice::parse(&raw)?;

        if choice.apply_to_all {
            match choice.action {
                MenuAction::Overwrite => self.state.overwrite_all = true,
                MenuAction::Backup => self.state.backup_all = true,
                MenuAction::Skip => self.state.skip_all = true,
            }
            info!(
                path = %file.filepath.display(),
                action = %choice.action,
                "applying decision to all remaining files"
            );
        }

        Ok(choice.action.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
