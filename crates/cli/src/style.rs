//! Shared styling utilities for the CLI.

use console::Style;
use scaffwrite_core::Action;

/// Create a success-styled string (green with checkmark).
pub fn success(msg: &str) -> String {
    let style = Style::new().green();
    format!("{} {}", style.apply_to("✓"), msg)
}

/// Create an error-styled string (red with cross).
pub fn error(msg: &str) -> String {
    let style = Style::new().red();
    format!("{} {}", style.apply_to("✗"), msg)
}

/// Create a warning-styled string (yellow).
pub fn warn(msg: &str) -> String {
    let style = Style::new().yellow();
    format!("{} {}", style.apply_to("⚠"), msg)
}

/// Create a header-styled string (bold).
pub fn header(msg: &str) -> String {
    let style = Style::new().bold();
    style.apply_to(msg).to_string()
}

/// Create a dim-styled string.
pub fn dim(msg: &str) -> String {
    let style = Style::new().dim();
    style.apply_to(msg).to_string()
}

/// Color for an action label, the way generators conventionally report:
/// green for new files, dim for no-ops, yellow/cyan/red for the conflict
/// outcomes.
fn action_style(action: Action) -> Style {
    match action {
        Action::Create => Style::new().green(),
        Action::Identical => Style::new().dim(),
        Action::Overwrite => Style::new().yellow(),
        Action::Backup => Style::new().cyan(),
        Action::Skip => Style::new().red(),
    }
}

/// One per-file output line: right-aligned colored label, then the path.
///
/// The label is padded before styling so ANSI codes do not skew alignment.
pub fn action_line(action: Action, rel_path: &str) -> String {
    let padded = format!("{:>12}", action.label());
    format!("{}  {}", action_style(action).apply_to(padded), rel_path)
}

/// Per-file line for a candidate dropped by an ignore pattern.
pub fn ignored_line(rel_path: &str) -> String {
    let padded = format!("{:>12}", "ignored");
    format!("{}  {}", Style::new().dim().apply_to(padded), rel_path)
}
