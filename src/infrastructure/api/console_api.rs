//! Console transport interface.
//!
//! Everything the orchestration layer needs from the provider is expressed
//! through this trait, so the pipeline logic can run against a scripted fake
//! in tests while production code talks HTTP.

use crate::common::result::PawgitResult;
use crate::domain::entities::console::{ConsoleInfo, CpuUsage};
use async_trait::async_trait;

/// Operations exposed by the remote console provider.
///
/// Implementations map provider-specific status codes onto the shared error
/// taxonomy; callers only ever see `PawgitError` values.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// Create a fresh bash console and return its metadata.
    ///
    /// The console exists after this call but may not be able to accept
    /// input yet; readiness is the caller's concern.
    async fn create_console(&self) -> PawgitResult<ConsoleInfo>;

    /// Fetch metadata for a console, or `None` if the provider no longer
    /// knows the id.
    async fn console_info(&self, console_id: u64) -> PawgitResult<Option<ConsoleInfo>>;

    /// Submit one line of input to a console.
    ///
    /// Implementations append the trailing newline; callers pass the bare
    /// command line.
    async fn send_input(&self, console_id: u64, input: &str) -> PawgitResult<()>;

    /// Read the accumulated output of a console.
    ///
    /// The provider returns a rolling buffer; it can shrink between calls
    /// when old output is dropped.
    async fn latest_output(&self, console_id: u64) -> PawgitResult<String>;

    /// Destroy a console.
    async fn destroy_console(&self, console_id: u64) -> PawgitResult<()>;

    /// List the consoles owned by the account. Doubles as an authentication
    /// check.
    async fn list_consoles(&self) -> PawgitResult<Vec<ConsoleInfo>>;

    /// Fetch the account's CPU quota usage.
    async fn cpu_usage(&self) -> PawgitResult<CpuUsage>;

    /// Whether a path exists on the remote filesystem.
    async fn path_exists(&self, path: &str) -> PawgitResult<bool>;
}
