use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// BranchName関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum BranchNameError {
    #[error("Branch name cannot be empty")]
    Empty,

    #[error("Branch name too long: {0} characters (max: 255)")]
    TooLong(usize),

    #[error("Invalid character in branch name: {0}")]
    InvalidCharacter(String),

    #[error("Branch name cannot start with '-': {0}")]
    StartsWithHyphen(String),

    #[error("Branch name cannot end with '.lock': {0}")]
    EndsWithLock(String),

    #[error("Branch name contains consecutive dots: {0}")]
    ConsecutiveDots(String),

    #[error("Reserved branch name: {0}")]
    Reserved(String),
}

/// Gitブランチ名の値オブジェクト
///
/// コンソールに送るコマンド文字列へそのまま埋め込まれるため、
/// gitの規則に加えてシェル的に危険な文字も拒否する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchName {
    /// 検証済みブランチ名
    name: String,
}

impl BranchName {
    /// 新しいBranchNameインスタンスを作成
    pub fn new(name: &str) -> Result<Self, BranchNameError> {
        Self::validate(name)?;
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// デフォルトブランチ（main）を取得
    pub fn default_branch() -> Self {
        Self {
            name: "main".to_string(),
        }
    }

    /// ブランチ名の妥当性を検証
    fn validate(name: &str) -> Result<(), BranchNameError> {
        // 空文字チェック
        if name.is_empty() {
            return Err(BranchNameError::Empty);
        }

        // 長さチェック（255文字まで）
        if name.len() > 255 {
            return Err(BranchNameError::TooLong(name.len()));
        }

        // ハイフンで始まるかチェック
        if name.starts_with('-') {
            return Err(BranchNameError::StartsWithHyphen(name.to_string()));
        }

        // .lockで終わるかチェック
        if name.ends_with(".lock") {
            return Err(BranchNameError::EndsWithLock(name.to_string()));
        }

        // 予約語チェック
        if matches!(name, "HEAD" | "ORIG_HEAD" | "FETCH_HEAD" | "MERGE_HEAD") {
            return Err(BranchNameError::Reserved(name.to_string()));
        }

        // 不正な文字をチェック
        // ASCII制御文字、スペース、gitが禁止する文字、シェルのメタ文字
        for ch in name.chars() {
            if ch.is_ascii_control()
                || ch == ' '
                || ch == '~'
                || ch == '^'
                || ch == ':'
                || ch == '?'
                || ch == '*'
                || ch == '['
                || ch == '\\'
                || ch == '\''
                || ch == '"'
                || ch == '`'
                || ch == '$'
                || ch == ';'
                || ch == '&'
                || ch == '|'
                || ch == '\x7F'
            {
                return Err(BranchNameError::InvalidCharacter(ch.to_string()));
            }
        }

        // 連続するドットをチェック
        if name.contains("..") {
            return Err(BranchNameError::ConsecutiveDots(name.to_string()));
        }

        Ok(())
    }

    /// ブランチ名を文字列として取得
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// ブランチ名を所有権付きで取得
    pub fn into_string(self) -> String {
        self.name
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl TryFrom<&str> for BranchName {
    type Error = BranchNameError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        BranchName::new(name)
    }
}

impl TryFrom<String> for BranchName {
    type Error = BranchNameError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        BranchName::new(&name)
    }
}
