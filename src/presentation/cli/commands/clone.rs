use crate::application::use_cases::run_git_operation::GitOperationConfig;
use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::git_operation::GitOperation;
use crate::domain::value_objects::project_path::ProjectPath;
use crate::domain::value_objects::repo_url::RepoUrl;
use crate::infrastructure::api::ApiClient;
use crate::presentation::cli::commands::{resolve_branch, run_and_report};
use anyhow::Result;
use std::sync::Arc;

/// Clone a repository onto the remote host
pub struct CloneCommand {
    /// Repository URL to clone
    pub url: String,
    /// Target path on the remote host
    pub path: Option<String>,
    /// Branch to check out
    pub branch: Option<String>,
    /// Print each command's output as it completes
    pub verbose: bool,
}

impl CloneCommand {
    pub fn new(
        url: String,
        path: Option<String>,
        branch: Option<String>,
        verbose: bool,
    ) -> Self {
        Self {
            url,
            path,
            branch,
            verbose,
        }
    }

    /// Execute the clone command
    pub async fn execute(
        &self,
        api: Arc<ApiClient>,
        credentials: &Credentials,
        config: GitOperationConfig,
    ) -> Result<()> {
        let url = RepoUrl::new(&self.url)?;
        let path = self.resolve_target_path(&url, credentials)?;
        let branch = resolve_branch(self.branch.as_deref())?;
        let operation = GitOperation::Clone { url, path, branch };

        run_and_report(api, credentials, &operation, config, self.verbose).await
    }

    /// Resolve the clone target: explicit flag, then the configured default
    /// path, then the user's home directory plus the repository name.
    fn resolve_target_path(
        &self,
        url: &RepoUrl,
        credentials: &Credentials,
    ) -> Result<ProjectPath> {
        if let Some(path) = self.path.as_deref() {
            return Ok(ProjectPath::new(path)?);
        }
        if let Some(path) = credentials.project_path.as_deref() {
            return Ok(ProjectPath::new(path)?);
        }
        let repo_name = url.repo_name().ok_or_else(|| {
            anyhow::anyhow!("Cannot derive a target path from {}; pass --path", url)
        })?;
        Ok(ProjectPath::new(&format!(
            "/home/{}/{}",
            credentials.username, repo_name
        ))?)
    }
}
