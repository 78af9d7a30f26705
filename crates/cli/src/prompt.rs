//! The interactive conflict chooser, built on `dialoguer`.
//!
//! Implements [`ActionPrompt`] for the decision engine. Before presenting
//! the menu it can print a colored unified diff of the on-disk content
//! against the proposed content; the apply loop stages that context here
//! because the engine itself only hands the prompt a message string.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use dialoguer::Select;

use scaffwrite_core::conflict::ActionPrompt;
use scaffwrite_core::errors::ResolveError;

use crate::style;

/// Content pair for the diff preview shown above the menu.
struct DiffContext {
    path: PathBuf,
    proposed: Vec<u8>,
}

/// Terminal prompt for conflict decisions.
///
/// Lend it to the engine by reference (`Conflicter::new(probe, &prompt)`) so
/// the apply loop can keep calling [`CliPrompt::stage`] between files.
pub struct CliPrompt {
    show_diff: bool,
    context: RefCell<Option<DiffContext>>,
}

impl CliPrompt {
    pub fn new(show_diff: bool) -> Self {
        Self {
            show_diff,
            context: RefCell::new(None),
        }
    }

    /// Stage the candidate the next prompt (if any) is about.
    pub fn stage(&self, path: &Path, proposed: &[u8]) {
        *self.context.borrow_mut() = Some(DiffContext {
            path: path.to_path_buf(),
            proposed: proposed.to_vec(),
        });
    }

    /// Print a unified diff of on-disk vs. proposed content.
    ///
    /// Binary or unreadable content degrades to a note rather than failing
    /// the prompt: the diff is a courtesy, the menu is the contract.
    fn print_diff(&self, context: &DiffContext) {
        let on_disk = match std::fs::read(&context.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                println!("{}", style::warn(&format!("diff unavailable: {}", err)));
                return;
            }
        };

        match (
            String::from_utf8(on_disk),
            std::str::from_utf8(&context.proposed),
        ) {
            (Ok(old), Ok(new)) => {
                let patch = diffy::create_patch(&old, new);
                let formatter = diffy::PatchFormatter::new().with_color();
                println!();
                print!("{}", formatter.fmt_patch(&patch));
                println!();
            }
            _ => {
                println!(
                    "{}",
                    style::dim("(binary content differs; diff not shown)")
                );
            }
        }
    }
}

impl ActionPrompt for CliPrompt {
    async fn choose(
        &self,
        message: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<String, ResolveError> {
        if self.show_diff {
            if let Some(context) = self.context.borrow_mut().take() {
                self.print_diff(&context);
            }
        }

        let selection = Select::new()
            .with_prompt(message)
            .items(choices)
            .default(default)
            .interact();

        match selection {
            Ok(index) => Ok(choices[index].to_string()),
            Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => {
                Err(ResolveError::PromptCancelled(message.to_string()))
            }
            Err(dialoguer::Error::IO(err)) => Err(ResolveError::Probe(err)),
        }
    }
}
