use thiserror::Error;

#[derive(Error, Debug)]
pub enum PawgitError {
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        missing_fields: Vec<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Network operation failed: {message}")]
    NetworkError {
        message: String,
        url: Option<String>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Console unavailable: {message}")]
    ConsoleUnavailable {
        message: String,
        console_id: Option<u64>,
    },

    #[error("Console did not become ready within {timeout_secs} seconds")]
    ConsoleTimeout { timeout_secs: u64 },

    #[error("Command did not complete within {timeout_secs} seconds: {command}")]
    CommandTimeout { command: String, timeout_secs: u64 },

    #[error("Git operation failed: {message}")]
    GitFailure {
        message: String,
        command: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("Operation timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl PawgitError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            missing_fields: Vec::new(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            missing_fields: Vec::new(),
            source: Some(Box::new(source)),
        }
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self::ConfigError {
            message: format!("Missing required credential fields: {}", fields.join(", ")),
            missing_fields: fields,
            source: None,
        }
    }

    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::AuthError {
            message: message.into(),
        }
    }

    pub fn network_error(message: impl Into<String>, url: Option<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
            url,
            source: None,
        }
    }

    pub fn network_error_with_source(
        message: impl Into<String>,
        url: Option<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::NetworkError {
            message: message.into(),
            url,
            source: Some(source),
        }
    }

    pub fn console_unavailable(message: impl Into<String>, console_id: Option<u64>) -> Self {
        Self::ConsoleUnavailable {
            message: message.into(),
            console_id,
        }
    }

    pub fn console_timeout(timeout_secs: u64) -> Self {
        Self::ConsoleTimeout { timeout_secs }
    }

    pub fn command_timeout(command: impl Into<String>, timeout_secs: u64) -> Self {
        Self::CommandTimeout {
            command: command.into(),
            timeout_secs,
        }
    }

    pub fn git_failure(message: impl Into<String>) -> Self {
        Self::GitFailure {
            message: message.into(),
            command: None,
            exit_code: None,
        }
    }

    pub fn git_failure_with_command(
        message: impl Into<String>,
        command: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::GitFailure {
            message: message.into(),
            command: Some(command.into()),
            exit_code,
        }
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Whether a retry has any chance of succeeding.
    ///
    /// Network hiccups, console readiness problems and command timeouts are
    /// transient; configuration, authentication and git failures are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::ConsoleUnavailable { .. }
                | Self::ConsoleTimeout { .. }
                | Self::CommandTimeout { .. }
        )
    }
}
