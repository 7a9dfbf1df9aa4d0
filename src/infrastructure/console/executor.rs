//! Remote command execution.
//!
//! Runs one command at a time on a console through the sentinel protocol:
//! record a baseline output offset, submit the wrapped command, poll the
//! output suffix until the sentinel shows up, then classify the result.

use crate::common::error::PawgitError;
use crate::common::result::PawgitResult;
use crate::domain::entities::git_operation::PipelineStep;
use crate::infrastructure::api::console_api::ConsoleApi;
use crate::infrastructure::console::classifier::{CommandOutcome, OutcomeClassifier};
use crate::infrastructure::console::completion::{
    detect_completion, suffix_from, CompletionMarker, CompletionSignal,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Configuration for command execution.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Seconds to wait for a command's sentinel before giving up.
    pub command_timeout_secs: u64,

    /// Milliseconds between output polls.
    pub poll_interval_ms: u64,

    /// Secret strings masked out of captured output before it is stored or
    /// shown anywhere.
    secrets: Vec<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 180,
            poll_interval_ms: 1000,
            secrets: Vec::new(),
        }
    }
}

impl ExecutionConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-command timeout.
    pub fn with_command_timeout_secs(mut self, secs: u64) -> Self {
        self.command_timeout_secs = secs;
        self
    }

    /// Set the output poll interval.
    pub fn with_poll_interval_ms(mut self, millis: u64) -> Self {
        self.poll_interval_ms = millis;
        self
    }

    /// Register a secret to mask out of captured output.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.trim().is_empty() {
            self.secrets.push(secret);
        }
        self
    }
}

/// Aggregated result of a fail-fast command sequence.
#[derive(Debug, Clone, Default)]
pub struct PipelineResult {
    /// Whether every command in the sequence succeeded.
    pub success: bool,

    /// Per-command outcomes, in execution order. On failure the list stops
    /// at the failing command.
    pub outcomes: Vec<CommandOutcome>,

    /// Index of the first failing command, if any.
    pub failed_step: Option<usize>,
}

impl PipelineResult {
    fn new() -> Self {
        Self {
            success: true,
            outcomes: Vec::new(),
            failed_step: None,
        }
    }

    /// Whether the whole sequence succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The outcome of the first failing command, if any.
    pub fn first_failure(&self) -> Option<&CommandOutcome> {
        self.failed_step.and_then(|index| self.outcomes.get(index))
    }
}

/// Executes commands on a console via the completion protocol.
pub struct CommandExecutor<A: ConsoleApi> {
    api: Arc<A>,
    config: ExecutionConfig,
    classifier: OutcomeClassifier,
}

impl<A: ConsoleApi> CommandExecutor<A> {
    /// Create an executor with the default classifier.
    pub fn new(api: Arc<A>, config: ExecutionConfig) -> Self {
        Self {
            api,
            config,
            classifier: OutcomeClassifier::default(),
        }
    }

    /// Replace the outcome classifier.
    pub fn with_classifier(mut self, classifier: OutcomeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Run one command to completion and classify its outcome.
    ///
    /// Returns `CommandTimeout` when the sentinel never shows up within the
    /// configured timeout; that is a transient error, never a silent
    /// success.
    pub async fn run(&self, console_id: u64, step: &PipelineStep) -> PawgitResult<CommandOutcome> {
        let marker = CompletionMarker::new();
        let wrapped = marker.wrap(&step.command);

        let mut baseline = self.api.latest_output(console_id).await?.len();
        debug!(console_id, command = %step.display, baseline, "submitting command");
        self.api.send_input(console_id, &wrapped).await?;

        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let deadline = Duration::from_secs(self.config.command_timeout_secs);
        let started = Instant::now();

        loop {
            if started.elapsed() >= deadline {
                warn!(console_id, command = %step.display, "command timed out");
                return Err(PawgitError::command_timeout(
                    step.display.clone(),
                    self.config.command_timeout_secs,
                ));
            }

            tokio::time::sleep(poll_interval).await;

            let output = self.api.latest_output(console_id).await?;
            if output.len() < baseline {
                // The provider keeps a rolling buffer; when it shrinks the
                // recorded offset is meaningless and the whole buffer gets
                // rescanned. Stale sentinels cannot match: the marker nonce
                // is unique per invocation.
                debug!(console_id, "output buffer shrank, resetting baseline");
                baseline = 0;
            }

            let suffix = suffix_from(&output, baseline);
            if let CompletionSignal::Finished { exit_code, output } =
                detect_completion(suffix, &marker)
            {
                let captured = self.mask_secrets(output);
                let outcome = self
                    .classifier
                    .classify(&step.display, exit_code, &captured);
                debug!(
                    console_id,
                    exit_code,
                    success = outcome.success,
                    "command finished"
                );
                return Ok(outcome);
            }
        }
    }

    /// Run an ordered sequence of commands on one console, fail-fast.
    ///
    /// Command N+1 is never submitted before command N's outcome is
    /// classified. The first failing command stops the sequence and is
    /// recorded as the failing step.
    pub async fn run_sequence(
        &self,
        console_id: u64,
        steps: &[PipelineStep],
    ) -> PawgitResult<PipelineResult> {
        let mut result = PipelineResult::new();

        for (index, step) in steps.iter().enumerate() {
            let outcome = self.run(console_id, step).await?;
            let failed = !outcome.success;
            result.outcomes.push(outcome);

            if failed {
                result.success = false;
                result.failed_step = Some(index);
                break;
            }
        }

        Ok(result)
    }

    fn mask_secrets(&self, text: &str) -> String {
        let mut masked = text.to_string();
        for secret in &self.config.secrets {
            masked = masked.replace(secret, "****");
        }
        masked
    }
}
