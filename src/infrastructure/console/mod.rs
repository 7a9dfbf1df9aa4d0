//! Console command execution.
//!
//! Everything that turns a remote console's append-only text stream into
//! reliable command execution: the completion protocol, output
//! classification, the per-command executor, and console lifecycle
//! management.

pub mod classifier;
pub mod completion;
pub mod executor;
pub mod manager;

pub use classifier::{CommandOutcome, OutcomeClassifier};
pub use completion::{detect_completion, suffix_from, CompletionMarker, CompletionSignal};
pub use executor::{CommandExecutor, ExecutionConfig, PipelineResult};
pub use manager::{ConsoleManager, ConsoleManagerConfig};
