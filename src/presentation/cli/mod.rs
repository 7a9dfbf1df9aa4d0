pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use crate::application::services::credential_service::CredentialResolver;
use crate::application::use_cases::run_git_operation::GitOperationConfig;
use crate::common::error::PawgitError;
use crate::domain::entities::credentials::Credentials;
use crate::infrastructure::api::ApiClient;
use crate::presentation::cli::commands::{
    check::CheckCommand, clone::CloneCommand, deploy::DeployCommand, pull::PullCommand,
    push::PushCommand,
};

/// pawgit - Run git operations on a PythonAnywhere host through its console API
#[derive(Parser)]
#[command(name = "pawgit")]
#[command(about = "Run git pull/push/clone on a PythonAnywhere host through its console API")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("GIT_HASH"), ", built ", env!("BUILD_DATE"), ")"
))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-command timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull the latest changes into a project on the remote host
    Pull {
        /// Project path on the remote host (defaults to PAW_PROJECT_PATH)
        #[arg(short, long)]
        path: Option<String>,

        /// Branch to pull (defaults to main)
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Commit and push local changes from the remote host
    Push {
        /// Project path on the remote host (defaults to PAW_PROJECT_PATH)
        #[arg(short, long)]
        path: Option<String>,

        /// Branch to push (defaults to main)
        #[arg(short, long)]
        branch: Option<String>,

        /// Commit message (defaults to a timestamped message)
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Clone a repository onto the remote host
    Clone {
        /// Repository URL to clone
        url: String,

        /// Target path on the remote host
        #[arg(short, long)]
        path: Option<String>,

        /// Branch to check out (defaults to main)
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Pull every configured project in order
    Deploy {
        /// Project names to deploy (defaults to every project in the config)
        #[arg(short, long)]
        project: Vec<String>,
    },

    /// Verify credentials and connectivity
    Check,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub async fn run(self) -> Result<()> {
        // colored already disables itself on non-TTY output; the flag only
        // ever forces color off
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Pull { path, branch } => self.handle_pull_command(path, branch).await,
            Commands::Push {
                path,
                branch,
                message,
            } => self.handle_push_command(path, branch, message).await,
            Commands::Clone { url, path, branch } => {
                self.handle_clone_command(url, path, branch).await
            }
            Commands::Deploy { project } => self.handle_deploy_command(project).await,
            Commands::Check => self.handle_check_command().await,
        }
    }

    async fn handle_pull_command(
        &self,
        path: &Option<String>,
        branch: &Option<String>,
    ) -> Result<()> {
        let credentials = self.resolve_credentials().await?;
        let api = Arc::new(ApiClient::new(&credentials)?);

        let command = PullCommand::new(path.clone(), branch.clone(), self.cli.verbose);
        command
            .execute(api, &credentials, self.operation_config())
            .await
    }

    async fn handle_push_command(
        &self,
        path: &Option<String>,
        branch: &Option<String>,
        message: &Option<String>,
    ) -> Result<()> {
        let credentials = self.resolve_credentials().await?;
        let api = Arc::new(ApiClient::new(&credentials)?);

        let command = PushCommand::new(
            path.clone(),
            branch.clone(),
            message.clone(),
            self.cli.verbose,
        );
        command
            .execute(api, &credentials, self.operation_config())
            .await
    }

    async fn handle_clone_command(
        &self,
        url: &str,
        path: &Option<String>,
        branch: &Option<String>,
    ) -> Result<()> {
        let credentials = self.resolve_credentials().await?;
        let api = Arc::new(ApiClient::new(&credentials)?);

        let command = CloneCommand::new(
            url.to_string(),
            path.clone(),
            branch.clone(),
            self.cli.verbose,
        );
        command
            .execute(api, &credentials, self.operation_config())
            .await
    }

    async fn handle_deploy_command(&self, selection: &[String]) -> Result<()> {
        let resolver = CredentialResolver::from_process_env();
        let credentials = self.resolve_credentials().await?;
        let projects = resolver
            .resolve_projects(self.cli.config.as_deref(), selection)
            .await
            .map_err(PawgitError::from)?;
        let api = Arc::new(ApiClient::new(&credentials)?);

        let command = DeployCommand::new(self.cli.verbose);
        command
            .execute(api, &credentials, &projects, self.operation_config())
            .await
    }

    async fn handle_check_command(&self) -> Result<()> {
        let credentials = self.resolve_credentials().await?;
        let api = Arc::new(ApiClient::new(&credentials)?);

        let command = CheckCommand::new(self.cli.verbose);
        command.execute(api, &credentials).await
    }

    async fn resolve_credentials(&self) -> Result<Credentials> {
        let resolver = CredentialResolver::from_process_env();
        let credentials = resolver
            .resolve(self.cli.config.as_deref())
            .await
            .map_err(PawgitError::from)?;
        Ok(credentials)
    }

    fn operation_config(&self) -> GitOperationConfig {
        let mut config = GitOperationConfig::default();
        if let Some(timeout) = self.cli.timeout {
            config = config.with_command_timeout_secs(timeout);
        }
        config
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
