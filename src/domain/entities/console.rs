use serde::{Deserialize, Serialize};

/// コンソールの取得元
///
/// 永続コンソールはユーザーが事前に用意したものでツールは破棄しない。
/// 一時コンソールは操作のために作成され、完了後に必ず破棄される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOrigin {
    /// 既存コンソールへのバインド
    Persistent,
    /// この操作のために作成されたコンソール
    Ephemeral,
}

/// コンソールのライフサイクル状態
///
/// `uninitialized → ready → executing → ready → (destroyed)` と遷移し、
/// `destroyed` に到達するのは一時コンソールのみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    /// 取得直後、疎通確認前
    Uninitialized,
    /// 疎通確認済みでコマンド実行可能
    Ready,
    /// コマンド実行中
    Executing,
    /// 破棄済み
    Destroyed,
}

/// 取得済みコンソールのハンドル
#[derive(Debug, Clone)]
pub struct Console {
    id: u64,
    origin: ConsoleOrigin,
    state: ConsoleState,
}

impl Console {
    /// 永続コンソールへのハンドルを作成
    pub fn persistent(id: u64) -> Self {
        Self {
            id,
            origin: ConsoleOrigin::Persistent,
            state: ConsoleState::Uninitialized,
        }
    }

    /// 一時コンソールへのハンドルを作成
    pub fn ephemeral(id: u64) -> Self {
        Self {
            id,
            origin: ConsoleOrigin::Ephemeral,
            state: ConsoleState::Uninitialized,
        }
    }

    /// コンソールIDを取得
    pub fn id(&self) -> u64 {
        self.id
    }

    /// コンソールの取得元を取得
    pub fn origin(&self) -> ConsoleOrigin {
        self.origin
    }

    /// 現在の状態を取得
    pub fn state(&self) -> ConsoleState {
        self.state
    }

    /// 永続コンソールかどうかを判定
    pub fn is_persistent(&self) -> bool {
        self.origin == ConsoleOrigin::Persistent
    }

    /// コマンド実行可能かどうかを判定
    pub fn is_ready(&self) -> bool {
        self.state == ConsoleState::Ready
    }

    /// 疎通確認済みとしてマーク
    pub fn mark_ready(&mut self) {
        self.state = ConsoleState::Ready;
    }

    /// コマンド実行中としてマーク
    pub fn mark_executing(&mut self) {
        self.state = ConsoleState::Executing;
    }

    /// 破棄済みとしてマーク
    pub fn mark_destroyed(&mut self) {
        self.state = ConsoleState::Destroyed;
    }
}

/// コンソールAPIが返すコンソール情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleInfo {
    /// コンソールID
    pub id: u64,

    /// 所有ユーザー名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// 実行されるシェル（例: bash）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// シェルへの引数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,

    /// 作業ディレクトリ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,

    /// コンソールの表示名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// ブラウザで開くためのURL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_url: Option<String>,
}

/// CPUクォータ情報
///
/// `/cpu/` エンドポイントは疎通確認の補助としてベストエフォートで
/// 取得するだけなので、全フィールドをオプションとして扱う。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuUsage {
    /// 1日あたりのCPU制限（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_cpu_limit_seconds: Option<f64>,

    /// 当日のCPU使用量（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_cpu_total_usage_seconds: Option<f64>,

    /// 次回リセット時刻
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_reset_time: Option<String>,
}
