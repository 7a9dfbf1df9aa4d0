use crate::common::error::PawgitError;
use crate::common::result::{async_helpers, PawgitResult};
use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::git_operation::GitOperation;
use crate::infrastructure::api::console_api::ConsoleApi;
use crate::infrastructure::console::executor::{CommandExecutor, ExecutionConfig, PipelineResult};
use crate::infrastructure::console::manager::ConsoleManagerConfig;
use crate::infrastructure::console::ConsoleManager;
use crate::infrastructure::retry::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, info};

/// Git操作実行の設定
#[derive(Debug, Clone)]
pub struct GitOperationConfig {
    /// コマンドごとのタイムアウト（秒）
    pub command_timeout_secs: u64,

    /// パイプライン全体のタイムアウト（秒）
    pub pipeline_timeout_secs: u64,

    /// 出力のポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,

    /// 一時的な失敗に対するリトライポリシー
    pub retry: RetryPolicy,

    /// コンソール取得の設定
    pub console: ConsoleManagerConfig,
}

impl Default for GitOperationConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 180,
            pipeline_timeout_secs: 600,
            poll_interval_ms: 1000,
            retry: RetryPolicy::default(),
            console: ConsoleManagerConfig::default(),
        }
    }
}

impl GitOperationConfig {
    /// デフォルト設定で作成
    pub fn new() -> Self {
        Self::default()
    }

    /// コマンドごとのタイムアウトを設定
    pub fn with_command_timeout_secs(mut self, secs: u64) -> Self {
        self.command_timeout_secs = secs;
        self
    }

    /// パイプライン全体のタイムアウトを設定
    pub fn with_pipeline_timeout_secs(mut self, secs: u64) -> Self {
        self.pipeline_timeout_secs = secs;
        self
    }

    /// ポーリング間隔を設定
    pub fn with_poll_interval_ms(mut self, millis: u64) -> Self {
        self.poll_interval_ms = millis;
        self
    }

    /// リトライポリシーを設定
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// コンソール取得の設定を置き換え
    pub fn with_console_config(mut self, console: ConsoleManagerConfig) -> Self {
        self.console = console;
        self
    }
}

/// Git操作実行のユースケース
///
/// コンソールの取得、コマンド列の逐次実行、一時的な失敗のリトライ、
/// コンソールの解放までを統括する。git自体の失敗（コンフリクト等）は
/// エラーではなく失敗した [`PipelineResult`] として返り、リトライの
/// 対象にならない。
pub struct RunGitOperationUseCase<A: ConsoleApi> {
    api: Arc<A>,
    config: GitOperationConfig,
}

impl<A: ConsoleApi> RunGitOperationUseCase<A> {
    /// 新しいRunGitOperationUseCaseインスタンスを作成
    pub fn new(api: Arc<A>, config: GitOperationConfig) -> Self {
        Self { api, config }
    }

    /// Git操作を実行
    pub async fn execute(
        &self,
        credentials: &Credentials,
        operation: &GitOperation,
    ) -> PawgitResult<PipelineResult> {
        info!(operation = %operation.describe(), "starting git operation");

        // 1. クローンの事前条件チェック
        //    対象パスが既に存在するならコンソールに触れる前に失敗させる
        if let GitOperation::Clone { path, .. } = operation {
            if self.api.path_exists(path.as_str()).await? {
                return Err(PawgitError::config_error(format!(
                    "Clone target already exists on the remote host: {path}"
                )));
            }
        }

        // 2. コマンド列の構築
        let steps = operation.command_sequence(credentials.git_token());
        debug!(step_count = steps.len(), "pipeline built");

        // 3. 実行設定
        //    APIトークンとGitHubトークンはキャプチャした出力からもマスクする
        let mut exec_config = ExecutionConfig::new()
            .with_command_timeout_secs(self.config.command_timeout_secs)
            .with_poll_interval_ms(self.config.poll_interval_ms)
            .with_secret(credentials.token().expose());
        if let Some(token) = credentials.git_token() {
            exec_config = exec_config.with_secret(token.expose());
        }

        // 4. 取得と実行をまとめてリトライ単位にする
        //    コンソール自体が不調な場合、リトライで新しいコンソールを得るため
        let manager = ConsoleManager::new(self.api.clone(), self.config.console.clone());
        let executor = CommandExecutor::new(self.api.clone(), exec_config);
        let persistent_id = credentials.console_id;
        let pipeline_timeout = self.config.pipeline_timeout_secs;

        let result = self
            .config
            .retry
            .run(operation.kind(), || {
                let manager = &manager;
                let executor = &executor;
                let steps = &steps;
                async move {
                    manager
                        .with_console(persistent_id, |console| async move {
                            async_helpers::with_timeout(
                                executor.run_sequence(console.id(), steps),
                                pipeline_timeout,
                            )
                            .await
                        })
                        .await
                }
            })
            .await?;

        if result.is_success() {
            info!(operation = operation.kind(), "git operation completed");
        } else {
            debug!(
                operation = operation.kind(),
                failed_step = ?result.failed_step,
                "git operation failed"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_operation_config_builders() {
        let config = GitOperationConfig::new()
            .with_command_timeout_secs(30)
            .with_pipeline_timeout_secs(120)
            .with_poll_interval_ms(250)
            .with_retry(RetryPolicy::new().with_max_attempts(1));

        assert_eq!(config.command_timeout_secs, 30);
        assert_eq!(config.pipeline_timeout_secs, 120);
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_default_pipeline_timeout_covers_command_timeout() {
        let config = GitOperationConfig::default();
        assert!(config.pipeline_timeout_secs > config.command_timeout_secs);
    }
}
