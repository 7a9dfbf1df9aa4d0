use crate::application::services::credential_service::ResolvedProject;
use crate::application::use_cases::run_git_operation::{
    GitOperationConfig, RunGitOperationUseCase,
};
use crate::common::error::PawgitError;
use crate::common::result::PawgitResult;
use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::git_operation::GitOperation;
use crate::domain::value_objects::branch_name::BranchName;
use crate::domain::value_objects::project_path::ProjectPath;
use crate::infrastructure::api::console_api::ConsoleApi;
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};

/// プロジェクトごとのデプロイ結果
#[derive(Debug, Clone)]
pub struct ProjectDeployResult {
    /// プロジェクト名
    pub name: String,

    /// 成功したかどうか
    pub succeeded: bool,

    /// 失敗した場合の理由
    pub failure: Option<String>,
}

/// マルチプロジェクトデプロイの結果
#[derive(Debug, Clone)]
pub struct DeployResult {
    /// プロジェクトごとの結果（実行順）
    pub results: Vec<ProjectDeployResult>,
}

impl DeployResult {
    /// 対象プロジェクト数
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// 成功したプロジェクト数
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded).count()
    }

    /// 失敗したプロジェクト数
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.succeeded).count()
    }

    /// 全プロジェクトが成功したかどうか
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// マルチプロジェクトデプロイのユースケース
///
/// 設定ファイルの `projects` から解決された各プロジェクトを順にpullする。
/// 1つの失敗はそこで打ち切らず、記録して次のプロジェクトへ進む。
pub struct DeployProjectsUseCase<A: ConsoleApi> {
    api: Arc<A>,
    config: GitOperationConfig,
}

impl<A: ConsoleApi> DeployProjectsUseCase<A> {
    /// 新しいDeployProjectsUseCaseインスタンスを作成
    pub fn new(api: Arc<A>, config: GitOperationConfig) -> Self {
        Self { api, config }
    }

    /// デプロイを実行
    pub async fn execute(
        &self,
        credentials: &Credentials,
        projects: &[ResolvedProject],
    ) -> PawgitResult<DeployResult> {
        let total = projects.len();
        let mut results = Vec::with_capacity(total);

        for (index, project) in projects.iter().enumerate() {
            info!(
                project = %project.name,
                position = index + 1,
                total,
                "deploying project"
            );
            println!(
                "[{}/{}] Deploying {} ({})...",
                index + 1,
                total,
                project.name.bold(),
                project.path
            );

            match self.deploy_one(credentials, project).await {
                Ok(()) => {
                    println!("  {} {}", "✓".green().bold(), project.name);
                    results.push(ProjectDeployResult {
                        name: project.name.clone(),
                        succeeded: true,
                        failure: None,
                    });
                }
                Err(error) => {
                    warn!(project = %project.name, %error, "project deploy failed");
                    println!("  {} {}: {}", "✗".red().bold(), project.name, error);
                    results.push(ProjectDeployResult {
                        name: project.name.clone(),
                        succeeded: false,
                        failure: Some(error.to_string()),
                    });
                }
            }
        }

        Ok(DeployResult { results })
    }

    // 1プロジェクトのpullを実行し、gitコマンドの失敗もエラーへ畳み込む
    async fn deploy_one(
        &self,
        credentials: &Credentials,
        project: &ResolvedProject,
    ) -> PawgitResult<()> {
        let path = ProjectPath::new(&project.path)
            .map_err(|e| PawgitError::config_error(format!("Project '{}': {e}", project.name)))?;
        let branch = BranchName::try_from(project.branch.as_str())
            .map_err(|e| PawgitError::config_error(format!("Project '{}': {e}", project.name)))?;
        let operation = GitOperation::Pull { path, branch };

        let use_case = RunGitOperationUseCase::new(self.api.clone(), self.config.clone());
        let result = use_case.execute(credentials, &operation).await?;

        match result.first_failure() {
            None => Ok(()),
            Some(outcome) => Err(PawgitError::git_failure_with_command(
                outcome
                    .failure_reason
                    .clone()
                    .unwrap_or_else(|| "command failed".to_string()),
                outcome.command.clone(),
                outcome.exit_code,
            )),
        }
    }
}
