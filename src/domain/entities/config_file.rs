use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// YAML設定ファイル全体の構造
///
/// どのセクションも省略可能で、環境変数だけで完結する構成も許される。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// PythonAnywhereアカウントのセクション
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pythonanywhere: Option<ProviderSection>,

    /// 複数プロジェクトデプロイ用のプロジェクト定義
    /// （名前順で安定したイテレーション順になる）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<BTreeMap<String, ProjectEntry>>,
}

impl ConfigFile {
    /// 定義済みプロジェクト名の一覧を取得
    pub fn project_names(&self) -> Vec<String> {
        self.projects
            .as_ref()
            .map(|projects| projects.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// 名前でプロジェクト定義を取得
    pub fn project(&self, name: &str) -> Option<&ProjectEntry> {
        self.projects.as_ref()?.get(name)
    }
}

/// `pythonanywhere:` セクション
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    /// ユーザー名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// APIトークン
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// ホスト名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// 永続コンソールID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_id: Option<u64>,

    /// GitHubアクセストークン
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_token: Option<String>,
}

/// `projects:` の1エントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// リモートホスト上のプロジェクトパス
    pub path: String,

    /// 対象ブランチ（省略時は main）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// クローン元URL（クローン運用するプロジェクトのみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}
