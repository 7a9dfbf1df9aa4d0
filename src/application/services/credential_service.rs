use crate::common::error::PawgitError;
use crate::domain::entities::config_file::{ConfigFile, ProjectEntry};
use crate::domain::entities::credentials::{ApiToken, Credentials};
use crate::domain::value_objects::branch_name::BranchName;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// ユーザー名の環境変数
pub const ENV_USERNAME: &str = "PAW_USERNAME";
/// APIトークンの環境変数
pub const ENV_TOKEN: &str = "PAW_TOKEN";
/// ホスト名の環境変数
pub const ENV_HOST: &str = "PAW_HOST";
/// 永続コンソールIDの環境変数
pub const ENV_CONSOLE_ID: &str = "PAW_CLI";
/// デフォルトプロジェクトパスの環境変数
pub const ENV_PROJECT_PATH: &str = "PAW_PROJECT_PATH";
/// GitHubアクセストークンの環境変数
pub const ENV_GIT_TOKEN: &str = "GIT_TOKEN";

/// CredentialResolver関連のエラー
#[derive(Debug, Error)]
pub enum CredentialServiceError {
    #[error("Missing required credential fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid console id '{value}': expected a positive integer")]
    InvalidConsoleId { value: String },

    #[error("No projects defined in config file")]
    NoProjects,

    #[error("Project '{0}' not found in config file")]
    ProjectNotFound(String),
}

impl From<CredentialServiceError> for PawgitError {
    fn from(error: CredentialServiceError) -> Self {
        match error {
            CredentialServiceError::MissingFields { fields } => {
                PawgitError::missing_fields(fields)
            }
            other => {
                let message = other.to_string();
                PawgitError::config_error_with_source(message, other)
            }
        }
    }
}

/// デプロイ対象として解決されたプロジェクト
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    /// 設定ファイル上のプロジェクト名
    pub name: String,

    /// リモートホスト上のリポジトリパス
    pub path: String,

    /// 対象ブランチ
    pub branch: String,

    /// クローン用のリポジトリURL
    pub repo_url: Option<String>,
}

/// 認証情報リゾルバ
///
/// 環境変数とYAML設定ファイルの両方から認証情報を解決する。
/// フィールド単位でマージし、環境変数が常に優先される。
pub struct CredentialResolver {
    env: HashMap<String, String>,
}

impl CredentialResolver {
    /// プロセスの環境変数から作成
    pub fn from_process_env() -> Self {
        Self {
            env: std::env::vars().collect(),
        }
    }

    /// 明示的な環境変数マップから作成
    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self { env }
    }

    /// 認証情報を解決
    ///
    /// 必須フィールド（username / token / host）が欠けている場合は、
    /// 欠けているフィールドを全て列挙した単一のエラーを返す。
    /// 設定ファイルが読めなくても環境変数だけで揃うなら成功とする。
    pub async fn resolve(
        &self,
        config_path: Option<&Path>,
    ) -> Result<Credentials, CredentialServiceError> {
        let mut file_error = None;
        let section = match config_path {
            Some(path) => match self.load_config(path).await {
                Ok(config) => config.pythonanywhere,
                Err(error) => {
                    file_error = Some(error);
                    None
                }
            },
            None => None,
        };

        let username = self
            .env_value(ENV_USERNAME)
            .or_else(|| non_blank(section.as_ref().and_then(|s| s.username.as_deref())));
        let token = self
            .env_value(ENV_TOKEN)
            .or_else(|| non_blank(section.as_ref().and_then(|s| s.token.as_deref())));
        let host = self
            .env_value(ENV_HOST)
            .or_else(|| non_blank(section.as_ref().and_then(|s| s.host.as_deref())));

        match (username, token, host) {
            (Some(username), Some(token), Some(host)) => {
                if let Some(error) = file_error {
                    warn!(%error, "config file ignored; environment variables are complete");
                }
                debug!(%username, %host, "credentials resolved");

                let mut credentials = Credentials::new(username, ApiToken::new(token), host);

                if let Some(raw) = self.env_value(ENV_CONSOLE_ID) {
                    let id = raw.parse::<u64>().map_err(|_| {
                        CredentialServiceError::InvalidConsoleId { value: raw.clone() }
                    })?;
                    credentials = credentials.with_console_id(id);
                } else if let Some(id) = section.as_ref().and_then(|s| s.console_id) {
                    credentials = credentials.with_console_id(id);
                }

                if let Some(path) = self.env_value(ENV_PROJECT_PATH) {
                    credentials = credentials.with_project_path(path);
                }

                if let Some(git_token) = self
                    .env_value(ENV_GIT_TOKEN)
                    .or_else(|| non_blank(section.as_ref().and_then(|s| s.git_token.as_deref())))
                {
                    credentials = credentials.with_git_token(ApiToken::new(git_token));
                }

                Ok(credentials)
            }
            (username, token, host) => {
                // ファイルが壊れていたならそちらが根本原因
                if let Some(error) = file_error {
                    return Err(error);
                }

                let mut fields = Vec::new();
                if username.is_none() {
                    fields.push("username".to_string());
                }
                if token.is_none() {
                    fields.push("token".to_string());
                }
                if host.is_none() {
                    fields.push("host".to_string());
                }
                Err(CredentialServiceError::MissingFields { fields })
            }
        }
    }

    /// デプロイ対象プロジェクトを解決
    ///
    /// `selection` が空なら設定ファイルの全プロジェクトを名前順で返す。
    /// 指定がある場合は指定順を保ち、未定義の名前はエラーにする。
    pub async fn resolve_projects(
        &self,
        config_path: Option<&Path>,
        selection: &[String],
    ) -> Result<Vec<ResolvedProject>, CredentialServiceError> {
        let path = config_path.ok_or(CredentialServiceError::NoProjects)?;
        let config = self.load_config(path).await?;
        let projects = config
            .projects
            .filter(|projects| !projects.is_empty())
            .ok_or(CredentialServiceError::NoProjects)?;

        if selection.is_empty() {
            return Ok(projects
                .iter()
                .map(|(name, entry)| resolved_project(name, entry))
                .collect());
        }

        let mut result = Vec::with_capacity(selection.len());
        for name in selection {
            let entry = projects
                .get(name)
                .ok_or_else(|| CredentialServiceError::ProjectNotFound(name.clone()))?;
            result.push(resolved_project(name, entry));
        }
        Ok(result)
    }

    /// 設定ファイルを読み込んでパース
    pub async fn load_config(&self, path: &Path) -> Result<ConfigFile, CredentialServiceError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|source| {
            CredentialServiceError::FileRead {
                path: path.display().to_string(),
                source,
            }
        })?;
        serde_yaml::from_str(&text).map_err(|source| CredentialServiceError::Yaml {
            path: path.display().to_string(),
            source,
        })
    }

    fn env_value(&self, key: &str) -> Option<String> {
        non_blank(self.env.get(key).map(String::as_str))
    }
}

fn resolved_project(name: &str, entry: &ProjectEntry) -> ResolvedProject {
    ResolvedProject {
        name: name.to_string(),
        path: entry.path.clone(),
        branch: entry
            .branch
            .clone()
            .unwrap_or_else(|| BranchName::default_branch().into_string()),
        repo_url: entry.repo_url.clone(),
    }
}

// 空文字・空白のみの値は未設定として扱う
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
