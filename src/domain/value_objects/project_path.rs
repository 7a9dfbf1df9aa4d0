use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// ProjectPath関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum ProjectPathError {
    #[error("Project path cannot be empty")]
    Empty,

    #[error("Project path must be absolute: {0}")]
    NotAbsolute(String),

    #[error("Project path too long: {0} characters (max: 1024)")]
    TooLong(usize),

    #[error("Invalid character in project path: {0}")]
    InvalidCharacter(String),

    #[error("Project path contains parent traversal: {0}")]
    ParentTraversal(String),
}

/// リモートホスト上のプロジェクトパスの値オブジェクト
///
/// `cd` や `git clone` の引数としてコンソールのコマンドラインへ
/// 埋め込まれるため、許可する文字を厳しく制限する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectPath {
    /// 検証済みの絶対パス
    path: String,
}

impl ProjectPath {
    /// 新しいProjectPathインスタンスを作成
    pub fn new(path: &str) -> Result<Self, ProjectPathError> {
        let trimmed = path.trim();
        Self::validate(trimmed)?;

        // ルート以外は末尾スラッシュを取り除いて正規化する
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        Ok(Self {
            path: normalized.to_string(),
        })
    }

    /// パスの妥当性を検証
    fn validate(path: &str) -> Result<(), ProjectPathError> {
        if path.is_empty() {
            return Err(ProjectPathError::Empty);
        }

        if !path.starts_with('/') {
            return Err(ProjectPathError::NotAbsolute(path.to_string()));
        }

        if path.len() > 1024 {
            return Err(ProjectPathError::TooLong(path.len()));
        }

        if path.contains("..") {
            return Err(ProjectPathError::ParentTraversal(path.to_string()));
        }

        // 英数字とパスとして一般的な記号のみ許可する
        for ch in path.chars() {
            let allowed = ch.is_ascii_alphanumeric()
                || ch == '/'
                || ch == '.'
                || ch == '_'
                || ch == '-'
                || ch == '+'
                || ch == '@';
            if !allowed {
                return Err(ProjectPathError::InvalidCharacter(ch.to_string()));
            }
        }

        Ok(())
    }

    /// パスを文字列として取得
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// パスを所有権付きで取得
    pub fn into_string(self) -> String {
        self.path
    }

    /// 最後のパス要素を取得
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl TryFrom<&str> for ProjectPath {
    type Error = ProjectPathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        ProjectPath::new(path)
    }
}

impl TryFrom<String> for ProjectPath {
    type Error = ProjectPathError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        ProjectPath::new(&path)
    }
}
