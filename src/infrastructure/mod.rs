/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Provider HTTP API (console lifecycle, output retrieval, file checks)
/// - Console command execution (completion protocol, classification)
/// - Retry policies for transient failures
pub mod api;
pub mod console;
pub mod retry;

// Re-export commonly used types
pub use api::{ApiClient, ApiClientConfig, ConsoleApi};
pub use console::{
    CommandExecutor, CommandOutcome, ConsoleManager, ConsoleManagerConfig, ExecutionConfig,
    OutcomeClassifier, PipelineResult,
};
pub use retry::RetryPolicy;
