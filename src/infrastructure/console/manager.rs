//! Console lifecycle management.
//!
//! Acquisition either binds to a caller-supplied persistent console or
//! creates an ephemeral one, waits out the provider's asynchronous
//! activation, and probes interactivity before handing the console over.
//! Release is scoped: ephemeral consoles are destroyed on every exit path,
//! persistent ones are never touched.

use crate::common::error::PawgitError;
use crate::common::result::PawgitResult;
use crate::domain::entities::console::{Console, ConsoleOrigin};
use crate::domain::entities::git_operation::PipelineStep;
use crate::infrastructure::api::console_api::ConsoleApi;
use crate::infrastructure::console::executor::{CommandExecutor, ExecutionConfig};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Configuration for console acquisition.
#[derive(Debug, Clone)]
pub struct ConsoleManagerConfig {
    /// Seconds between readiness polls for a freshly created console.
    pub ready_poll_interval_secs: u64,

    /// Overall bound on the readiness wait, in seconds.
    pub ready_timeout_secs: u64,

    /// Timeout for the interactivity probe command, in seconds.
    pub probe_timeout_secs: u64,

    /// Milliseconds between output polls while probing.
    pub probe_poll_interval_ms: u64,
}

impl Default for ConsoleManagerConfig {
    fn default() -> Self {
        Self {
            ready_poll_interval_secs: 2,
            ready_timeout_secs: 60,
            probe_timeout_secs: 15,
            probe_poll_interval_ms: 1000,
        }
    }
}

impl ConsoleManagerConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the readiness poll interval.
    pub fn with_ready_poll_interval_secs(mut self, secs: u64) -> Self {
        self.ready_poll_interval_secs = secs;
        self
    }

    /// Set the overall readiness wait bound.
    pub fn with_ready_timeout_secs(mut self, secs: u64) -> Self {
        self.ready_timeout_secs = secs;
        self
    }

    /// Set the probe command timeout.
    pub fn with_probe_timeout_secs(mut self, secs: u64) -> Self {
        self.probe_timeout_secs = secs;
        self
    }

    /// Set the probe output poll interval.
    pub fn with_probe_poll_interval_ms(mut self, millis: u64) -> Self {
        self.probe_poll_interval_ms = millis;
        self
    }
}

/// Acquires and releases consoles; the only component that moves a
/// [`Console`] through its states.
pub struct ConsoleManager<A: ConsoleApi> {
    api: Arc<A>,
    config: ConsoleManagerConfig,
}

impl<A: ConsoleApi> ConsoleManager<A> {
    /// Create a manager.
    pub fn new(api: Arc<A>, config: ConsoleManagerConfig) -> Self {
        Self { api, config }
    }

    /// Acquire a usable console.
    ///
    /// With a persistent id, binds to that console and never creates or
    /// destroys anything. Without one, creates an ephemeral console and
    /// waits out the provider's activation. Both paths end with an
    /// interactivity probe; a persistent console is never assumed ready.
    pub async fn acquire(&self, persistent_id: Option<u64>) -> PawgitResult<Console> {
        match persistent_id {
            Some(id) => {
                let mut console = self.bind_persistent(id).await?;
                self.probe(&console).await?;
                console.mark_ready();
                debug!(console_id = id, "persistent console ready");
                Ok(console)
            }
            None => {
                let mut console = self.create_ephemeral().await?;
                if let Err(error) = self.probe(&console).await {
                    // Probe failed after we created the console; do not
                    // leak it.
                    self.destroy_quietly(console.id()).await;
                    return Err(error);
                }
                console.mark_ready();
                debug!(console_id = console.id(), "ephemeral console ready");
                Ok(console)
            }
        }
    }

    /// Release a console acquired with [`acquire`](Self::acquire).
    ///
    /// No-op for persistent consoles. Ephemeral consoles are destroyed;
    /// a destroy failure is logged and swallowed, since a stray console is
    /// a quota leak rather than a correctness problem.
    pub async fn release(&self, console: &mut Console) {
        match console.origin() {
            ConsoleOrigin::Persistent => {
                debug!(console_id = console.id(), "leaving persistent console alive");
            }
            ConsoleOrigin::Ephemeral => {
                self.destroy_quietly(console.id()).await;
                console.mark_destroyed();
            }
        }
    }

    /// Run `f` with an acquired console, releasing it on every exit path.
    pub async fn with_console<T, F, Fut>(
        &self,
        persistent_id: Option<u64>,
        f: F,
    ) -> PawgitResult<T>
    where
        F: FnOnce(Console) -> Fut,
        Fut: Future<Output = PawgitResult<T>>,
    {
        let mut console = self.acquire(persistent_id).await?;
        console.mark_executing();
        let result = f(console.clone()).await;
        console.mark_ready();
        self.release(&mut console).await;
        result
    }

    async fn bind_persistent(&self, console_id: u64) -> PawgitResult<Console> {
        match self.api.console_info(console_id).await? {
            Some(_) => Ok(Console::persistent(console_id)),
            None => Err(PawgitError::console_unavailable(
                "persistent console not found",
                Some(console_id),
            )),
        }
    }

    async fn create_ephemeral(&self) -> PawgitResult<Console> {
        let info = self.api.create_console().await?;
        info!(console_id = info.id, "created ephemeral console");

        // Provider-side activation is asynchronous: the console exists as
        // soon as create returns but may not be queryable yet.
        let interval = Duration::from_secs(self.config.ready_poll_interval_secs);
        let bound = Duration::from_secs(self.config.ready_timeout_secs);
        let started = Instant::now();

        loop {
            if self.api.console_info(info.id).await?.is_some() {
                return Ok(Console::ephemeral(info.id));
            }
            if started.elapsed() >= bound {
                self.destroy_quietly(info.id).await;
                return Err(PawgitError::console_timeout(self.config.ready_timeout_secs));
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Verify the console actually runs commands by requesting the working
    /// directory through the full completion protocol.
    async fn probe(&self, console: &Console) -> PawgitResult<()> {
        let config = ExecutionConfig::new()
            .with_command_timeout_secs(self.config.probe_timeout_secs)
            .with_poll_interval_ms(self.config.probe_poll_interval_ms);
        let executor = CommandExecutor::new(self.api.clone(), config);
        let step = PipelineStep::new("pwd");

        match executor.run(console.id(), &step).await {
            Ok(outcome) if outcome.success => Ok(()),
            Ok(outcome) => Err(PawgitError::console_unavailable(
                format!(
                    "readiness probe failed: {}",
                    outcome.failure_reason.unwrap_or_default()
                ),
                Some(console.id()),
            )),
            Err(PawgitError::CommandTimeout { .. }) => Err(PawgitError::console_unavailable(
                "readiness probe did not complete",
                Some(console.id()),
            )),
            Err(error) => Err(error),
        }
    }

    async fn destroy_quietly(&self, console_id: u64) {
        if let Err(error) = self.api.destroy_console(console_id).await {
            warn!(console_id, %error, "failed to destroy ephemeral console");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_manager_config_builders() {
        let config = ConsoleManagerConfig::new()
            .with_ready_poll_interval_secs(1)
            .with_ready_timeout_secs(30)
            .with_probe_timeout_secs(5)
            .with_probe_poll_interval_ms(100);

        assert_eq!(config.ready_poll_interval_secs, 1);
        assert_eq!(config.ready_timeout_secs, 30);
        assert_eq!(config.probe_timeout_secs, 5);
        assert_eq!(config.probe_poll_interval_ms, 100);
    }

    #[test]
    fn test_console_manager_config_defaults_are_bounded() {
        let config = ConsoleManagerConfig::default();
        assert!(config.ready_poll_interval_secs < config.ready_timeout_secs);
        assert!(config.probe_timeout_secs > 0);
    }
}
