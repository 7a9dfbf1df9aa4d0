use crate::application::services::credential_service::ResolvedProject;
use crate::application::use_cases::deploy_projects::DeployProjectsUseCase;
use crate::application::use_cases::run_git_operation::GitOperationConfig;
use crate::domain::entities::credentials::Credentials;
use crate::infrastructure::api::ApiClient;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Deploy every configured project by pulling each in order
pub struct DeployCommand {
    /// Print each command's output as it completes
    pub verbose: bool,
}

impl DeployCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Execute the deploy command
    pub async fn execute(
        &self,
        api: Arc<ApiClient>,
        credentials: &Credentials,
        projects: &[ResolvedProject],
        config: GitOperationConfig,
    ) -> Result<()> {
        println!(
            "{} Deploying {} project(s)...",
            "::".blue().bold(),
            projects.len()
        );

        let use_case = DeployProjectsUseCase::new(api, config);
        let result = use_case.execute(credentials, projects).await?;

        println!();
        let succeeded = format!("Successful: {}/{}", result.succeeded_count(), result.total());
        if result.is_success() {
            println!("{} {}", "✓".green().bold(), succeeded.green());
            return Ok(());
        }

        println!("{} {}", "✗".red().bold(), succeeded.yellow());
        println!(
            "{} Failed: {}/{}",
            "✗".red().bold(),
            result.failed_count(),
            result.total()
        );
        for project in result.results.iter().filter(|r| !r.succeeded) {
            let reason = project.failure.as_deref().unwrap_or("unknown failure");
            println!("  {}: {}", project.name.bold(), reason.red());
        }

        Err(anyhow::anyhow!(
            "{} of {} project(s) failed to deploy",
            result.failed_count(),
            result.total()
        ))
    }
}
