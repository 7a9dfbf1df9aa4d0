use serde::Deserialize;
use std::fmt;

/// APIトークンの値オブジェクト
///
/// DebugおよびDisplay出力では常にマスクされるため、
/// ログやエラーメッセージにトークンが漏れることはない。
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ApiToken(String);

impl ApiToken {
    /// 新しいApiTokenインスタンスを作成
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// トークンの生の値を取得
    ///
    /// Authorizationヘッダーの構築など、実際に値が必要な箇所のみで使用する。
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// トークンが空かどうかを判定
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(\"****\")")
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "****")
    }
}

/// PythonAnywhereアカウントへの接続情報
///
/// 環境変数とYAML設定ファイルのマージ結果として一度だけ解決され、
/// 以降は参照渡しで使い回される。
#[derive(Debug, Clone)]
pub struct Credentials {
    /// PythonAnywhereのユーザー名
    pub username: String,

    /// APIトークン（マスク付き）
    token: ApiToken,

    /// アカウントのホスト名（例: alice.pythonanywhere.com）
    pub host: String,

    /// 永続コンソールのID（設定されていればそのコンソールへバインドする）
    pub console_id: Option<u64>,

    /// デフォルトのプロジェクトパス
    pub project_path: Option<String>,

    /// プライベートリポジトリ用のGitHubトークン
    git_token: Option<ApiToken>,
}

impl Credentials {
    /// 新しいCredentialsインスタンスを作成
    pub fn new(
        username: impl Into<String>,
        token: ApiToken,
        host: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            token,
            host: host.into(),
            console_id: None,
            project_path: None,
            git_token: None,
        }
    }

    /// 永続コンソールIDを設定
    pub fn with_console_id(mut self, console_id: u64) -> Self {
        self.console_id = Some(console_id);
        self
    }

    /// デフォルトのプロジェクトパスを設定
    pub fn with_project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    /// GitHubトークンを設定
    pub fn with_git_token(mut self, token: ApiToken) -> Self {
        self.git_token = Some(token);
        self
    }

    /// APIトークンへの参照を取得
    pub fn token(&self) -> &ApiToken {
        &self.token
    }

    /// GitHubトークンへの参照を取得
    pub fn git_token(&self) -> Option<&ApiToken> {
        self.git_token.as_ref()
    }

    /// スキームと末尾スラッシュを除いたホスト名を取得
    pub fn normalized_host(&self) -> &str {
        let host = self.host.as_str();
        let host = host
            .strip_prefix("https://")
            .or_else(|| host.strip_prefix("http://"))
            .unwrap_or(host);
        host.trim_end_matches('/')
    }

    /// ホストがPythonAnywhereのドメインかどうかを判定
    pub fn is_pythonanywhere_host(&self) -> bool {
        self.normalized_host().contains("pythonanywhere.com")
    }

    /// APIのベースURLを解決
    ///
    /// EUドメインのホストはEUエンドポイントに、それ以外はUSエンドポイントに
    /// マッピングされる。
    pub fn api_base(&self) -> String {
        if self.normalized_host().contains("eu.pythonanywhere.com") {
            format!(
                "https://eu.pythonanywhere.com/api/v0/user/{}",
                self.username
            )
        } else {
            format!(
                "https://www.pythonanywhere.com/api/v0/user/{}",
                self.username
            )
        }
    }
}
