use crate::application::use_cases::run_git_operation::GitOperationConfig;
use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::git_operation::GitOperation;
use crate::infrastructure::api::ApiClient;
use crate::presentation::cli::commands::{resolve_branch, resolve_project_path, run_and_report};
use anyhow::Result;
use std::sync::Arc;

/// Commit and push local changes from the remote host
pub struct PushCommand {
    /// Project path on the remote host
    pub path: Option<String>,
    /// Branch to push
    pub branch: Option<String>,
    /// Commit message; a timestamped default is used when omitted
    pub message: Option<String>,
    /// Print each command's output as it completes
    pub verbose: bool,
}

impl PushCommand {
    pub fn new(
        path: Option<String>,
        branch: Option<String>,
        message: Option<String>,
        verbose: bool,
    ) -> Self {
        Self {
            path,
            branch,
            message,
            verbose,
        }
    }

    /// Execute the push command
    pub async fn execute(
        &self,
        api: Arc<ApiClient>,
        credentials: &Credentials,
        config: GitOperationConfig,
    ) -> Result<()> {
        let path = resolve_project_path(self.path.as_deref(), credentials)?;
        let branch = resolve_branch(self.branch.as_deref())?;
        let operation = GitOperation::Push {
            path,
            branch,
            message: self.message.clone(),
        };

        run_and_report(api, credentials, &operation, config, self.verbose).await
    }
}
