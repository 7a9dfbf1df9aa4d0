use crate::application::use_cases::run_git_operation::GitOperationConfig;
use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::git_operation::GitOperation;
use crate::infrastructure::api::ApiClient;
use crate::presentation::cli::commands::{resolve_branch, resolve_project_path, run_and_report};
use anyhow::Result;
use std::sync::Arc;

/// Pull the latest changes into a project on the remote host
pub struct PullCommand {
    /// Project path on the remote host
    pub path: Option<String>,
    /// Branch to pull
    pub branch: Option<String>,
    /// Print each command's output as it completes
    pub verbose: bool,
}

impl PullCommand {
    pub fn new(path: Option<String>, branch: Option<String>, verbose: bool) -> Self {
        Self {
            path,
            branch,
            verbose,
        }
    }

    /// Execute the pull command
    pub async fn execute(
        &self,
        api: Arc<ApiClient>,
        credentials: &Credentials,
        config: GitOperationConfig,
    ) -> Result<()> {
        let path = resolve_project_path(self.path.as_deref(), credentials)?;
        let branch = resolve_branch(self.branch.as_deref())?;
        let operation = GitOperation::Pull { path, branch };

        run_and_report(api, credentials, &operation, config, self.verbose).await
    }
}
