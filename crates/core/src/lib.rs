//! ScaffWrite core library.
//!
//! This crate provides the foundational components for conflict-aware file
//! writing: the decision engine that resolves collisions between generated
//! files and what already occupies their target paths, the collaborators that
//! probe the disk and apply decisions, candidate filtering, and
//! configuration.

pub mod config;
pub mod conflict;
pub mod errors;
pub mod policy;
pub mod writer;

// Re-exports for convenience.
pub use config::{ApplyConfig, ConflictMode};
pub use conflict::{Action, CandidateFile, Conflicter, DiskProbe};
pub use errors::{ConfigError, CoreError, ResolveError};
pub use policy::WritePolicy;
pub use writer::FileWriter;
