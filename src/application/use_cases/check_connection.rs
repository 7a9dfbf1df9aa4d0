use crate::common::result::{PawgitResult, PawgitResultExt};
use crate::domain::entities::console::CpuUsage;
use crate::domain::entities::credentials::Credentials;
use crate::infrastructure::api::console_api::ConsoleApi;
use std::sync::Arc;
use tracing::debug;

/// 接続確認の結果
#[derive(Debug)]
pub struct ConnectionReport {
    /// 認証に使ったユーザー名
    pub username: String,

    /// 解決されたAPIベースURL
    pub api_base: String,

    /// アカウント上のコンソール数
    pub console_count: usize,

    /// 永続コンソールが設定されている場合、その存在確認の結果
    pub persistent_console_found: Option<bool>,

    /// CPUクォータ（取得できた場合のみ）
    pub cpu: Option<CpuUsage>,
}

/// 接続確認のユースケース
///
/// コンソール一覧の取得で認証を確かめ、CPUクォータの取得で到達性を
/// 確かめる。クォータの取得失敗は致命的ではないためログに留める。
pub struct CheckConnectionUseCase<A: ConsoleApi> {
    api: Arc<A>,
}

impl<A: ConsoleApi> CheckConnectionUseCase<A> {
    /// 新しいCheckConnectionUseCaseインスタンスを作成
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// 接続確認を実行
    pub async fn execute(&self, credentials: &Credentials) -> PawgitResult<ConnectionReport> {
        // 認証エラーはここで顕在化する
        let consoles = self.api.list_consoles().await?;
        debug!(count = consoles.len(), "listed consoles");

        let persistent_console_found = match credentials.console_id {
            Some(id) => Some(self.api.console_info(id).await?.is_some()),
            None => None,
        };

        let cpu = self.api.cpu_usage().await.to_option_logged();

        Ok(ConnectionReport {
            username: credentials.username.clone(),
            api_base: credentials.api_base(),
            console_count: consoles.len(),
            persistent_console_found,
            cpu,
        })
    }
}
