//! The fixed conflict menu and its response parser.
//!
//! The interactive chooser presents exactly six literal options and hands the
//! selected string back to the engine. Parsing turns that string into a
//! structured [`Choice`] by exact-literal match -- there is no tolerance for
//! near-misses, since a misread "all" suffix would poison the session state.

use crate::errors::ResolveError;

use super::resolver::Action;

/// The six menu options, in presentation order.
pub const MENU_CHOICES: [&str; 6] = [
    "overwrite",
    "overwrite all",
    "backup",
    "backup all",
    "skip",
    "skip all",
];

/// Index of the pre-selected option (`overwrite`).
pub const DEFAULT_CHOICE: usize = 0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The per-file action a user can pick from the menu.
///
/// A strict subset of [`Action`]: `create` and `identical` are computed
/// outcomes, never offered as choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Overwrite,
    Backup,
    Skip,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Backup => write!(f, "backup"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

impl From<MenuAction> for Action {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::Overwrite => Action::Overwrite,
            MenuAction::Backup => Action::Backup,
            MenuAction::Skip => Action::Skip,
        }
    }
}

/// A parsed menu response: the action for this file, plus whether the user
/// asked to remember it for all future files in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub action: MenuAction,
    pub apply_to_all: bool,
}

impl Choice {
    /// Parse one of the six menu literals into a structured choice.
    ///
    /// Anything outside the exact literals is rejected with
    /// [`ResolveError::UnrecognizedChoice`].
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let choice = match raw {
            "overwrite" => Self {
                action: MenuAction::Overwrite,
                apply_to_all: false,
            },
            "overwrite all" => Self {
                action: MenuAction::Overwrite,
                apply_to_all: true,
            },
            "backup" => Self {
                action: MenuAction::Backup,
                apply_to_all: false,
            },
            "backup all" => Self {
                action: MenuAction::Backup,
                apply_to_all: true,
            },
            "skip" => Self {
                action: MenuAction::Skip,
                apply_to_all: false,
            },
            "skip all" => Self {
                action: MenuAction::Skip,
                apply_to_all: true,
            },
            other => return Err(ResolveError::UnrecognizedChoice(other.to_string())),
        };
        Ok(choice)
    }
}
