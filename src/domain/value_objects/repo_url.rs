use crate::domain::entities::credentials::ApiToken;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

/// RepoUrl関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum RepoUrlError {
    #[error("Repository URL cannot be empty")]
    Empty,

    #[error("Invalid repository URL: {0}")]
    InvalidFormat(String),

    #[error("Unsupported URL scheme: {0} (only http/https)")]
    UnsupportedScheme(String),

    #[error("Repository URL has no host")]
    MissingHost,

    #[error("Invalid character in repository URL: {0}")]
    InvalidCharacter(String),
}

/// gitリポジトリURLの値オブジェクト
///
/// コンソール上では認証ヘルパーが使えないことがあるため、
/// GitHubのプライベートリポジトリ向けにトークン埋め込みURLを生成できる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoUrl {
    /// 検証済みURL
    url: String,

    /// URLのホスト部
    host: String,
}

impl RepoUrl {
    /// 新しいRepoUrlインスタンスを作成
    pub fn new(url: &str) -> Result<Self, RepoUrlError> {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(RepoUrlError::Empty);
        }

        // コマンドラインへ埋め込まれるのでシェルのメタ文字を拒否する
        for ch in trimmed.chars() {
            if ch.is_ascii_control()
                || ch == ' '
                || ch == '\''
                || ch == '"'
                || ch == '`'
                || ch == '$'
                || ch == ';'
                || ch == '&'
                || ch == '|'
                || ch == '\\'
            {
                return Err(RepoUrlError::InvalidCharacter(ch.to_string()));
            }
        }

        let parsed = Url::parse(trimmed).map_err(|e| RepoUrlError::InvalidFormat(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(RepoUrlError::UnsupportedScheme(other.to_string())),
        }

        let host = parsed
            .host_str()
            .ok_or(RepoUrlError::MissingHost)?
            .to_string();

        Ok(Self {
            url: trimmed.to_string(),
            host,
        })
    }

    /// URLを文字列として取得
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// URLのホスト部を取得
    pub fn host(&self) -> &str {
        &self.host
    }

    /// GitHub上のリポジトリかどうかを判定
    pub fn is_github(&self) -> bool {
        self.host == "github.com" || self.host.ends_with(".github.com")
    }

    /// リポジトリ名（最後のパス要素、.git抜き）を取得
    pub fn repo_name(&self) -> Option<&str> {
        let path = self.url.trim_end_matches('/');
        let name = path.rsplit('/').next()?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() || name.contains(':') {
            None
        } else {
            Some(name)
        }
    }

    /// アクセストークンを埋め込んだクローン用URLを生成
    ///
    /// GitHub以外のホストではURLをそのまま返す。戻り値はシークレットを
    /// 含むため、ログには出さずコンソールへの送信のみに使うこと。
    pub fn with_access_token(&self, token: &ApiToken) -> String {
        if self.is_github() && !token.is_empty() {
            self.url.replacen(
                "https://github.com/",
                &format!("https://{}@github.com/", token.expose()),
                1,
            )
        } else {
            self.url.clone()
        }
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl TryFrom<&str> for RepoUrl {
    type Error = RepoUrlError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        RepoUrl::new(url)
    }
}

impl TryFrom<String> for RepoUrl {
    type Error = RepoUrlError;

    fn try_from(url: String) -> Result<Self, Self::Error> {
        RepoUrl::new(&url)
    }
}
