pub mod check;
pub mod clone;
pub mod deploy;
pub mod pull;
pub mod push;

pub use check::*;
pub use clone::*;
pub use deploy::*;
pub use pull::*;
pub use push::*;

use crate::application::use_cases::run_git_operation::{
    GitOperationConfig, RunGitOperationUseCase,
};
use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::git_operation::GitOperation;
use crate::domain::value_objects::branch_name::BranchName;
use crate::domain::value_objects::project_path::ProjectPath;
use crate::infrastructure::api::ApiClient;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Resolve the project path from the command-line flag or the configured
/// default, in that order.
pub(crate) fn resolve_project_path(
    flag: Option<&str>,
    credentials: &Credentials,
) -> Result<ProjectPath> {
    let raw = flag
        .map(str::to_string)
        .or_else(|| credentials.project_path.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No project path given; pass --path or set PAW_PROJECT_PATH")
        })?;
    Ok(ProjectPath::new(&raw)?)
}

pub(crate) fn resolve_branch(flag: Option<&str>) -> Result<BranchName> {
    match flag {
        Some(branch) => Ok(BranchName::try_from(branch)?),
        None => Ok(BranchName::default_branch()),
    }
}

/// Run a git operation and print the user-facing outcome.
///
/// On failure, prints the failing step index, its command, and the captured
/// output tail before returning an error.
pub(crate) async fn run_and_report(
    api: Arc<ApiClient>,
    credentials: &Credentials,
    operation: &GitOperation,
    config: GitOperationConfig,
    verbose: bool,
) -> Result<()> {
    println!("{} Running {}...", "::".blue().bold(), operation.describe());

    let use_case = RunGitOperationUseCase::new(api, config);
    let result = use_case.execute(credentials, operation).await?;

    if verbose {
        for outcome in &result.outcomes {
            println!("{} {}", "$".blue().bold(), outcome.command);
            let text = outcome.output.trim_end();
            if !text.is_empty() {
                println!("{}", text);
            }
        }
    }

    match (result.failed_step, result.first_failure()) {
        (Some(index), Some(outcome)) => {
            eprintln!(
                "{} Step {} failed: {}",
                "✗".red().bold(),
                index + 1,
                outcome.command.bold()
            );
            let tail = outcome.output_tail(15);
            if !tail.is_empty() {
                eprintln!("{}", tail.red());
            }
            let reason = outcome
                .failure_reason
                .as_deref()
                .unwrap_or("command failed");
            Err(anyhow::anyhow!("{} failed: {}", operation.kind(), reason))
        }
        _ => {
            println!(
                "{} {} completed successfully",
                "✓".green().bold(),
                operation.kind()
            );
            Ok(())
        }
    }
}
