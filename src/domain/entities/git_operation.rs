use crate::domain::entities::credentials::ApiToken;
use crate::domain::value_objects::branch_name::BranchName;
use crate::domain::value_objects::project_path::ProjectPath;
use crate::domain::value_objects::repo_url::RepoUrl;

/// パイプラインを構成する1ステップ
///
/// `command` はコンソールへ送信される生のコマンドでシークレットを含みうる。
/// ログや結果表示には必ず `display` を使うこと。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    /// コンソールへ送信するコマンド
    pub command: String,

    /// ログ・表示用のコマンド（シークレットはマスク済み）
    pub display: String,
}

impl PipelineStep {
    /// ステップを作成
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            display: command.clone(),
            command,
        }
    }

    /// シークレットを含むステップを作成（表示用コマンドを別に持つ）
    pub fn sensitive(command: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            display: display.into(),
        }
    }
}

/// リモートコンソール上で実行するgit操作
///
/// 1つの操作は、同一コンソール上で順に実行されるコマンド列へ
/// 決定的に展開される。
#[derive(Debug, Clone)]
pub enum GitOperation {
    /// 既存のワーキングコピーを最新化する
    Pull {
        /// プロジェクトのパス
        path: ProjectPath,
        /// 対象ブランチ
        branch: BranchName,
    },

    /// ローカルの変更をコミットしてプッシュする
    Push {
        /// プロジェクトのパス
        path: ProjectPath,
        /// 対象ブランチ
        branch: BranchName,
        /// コミットメッセージ（省略時はタイムスタンプ付きの定型文）
        message: Option<String>,
    },

    /// リポジトリを新規クローンする
    Clone {
        /// クローン元URL
        url: RepoUrl,
        /// クローン先のパス（事前に存在してはならない）
        path: ProjectPath,
        /// チェックアウトするブランチ
        branch: BranchName,
    },
}

impl GitOperation {
    /// 操作種別の名前を取得
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pull { .. } => "pull",
            Self::Push { .. } => "push",
            Self::Clone { .. } => "clone",
        }
    }

    /// 操作対象のパスを取得
    pub fn target_path(&self) -> &ProjectPath {
        match self {
            Self::Pull { path, .. } | Self::Push { path, .. } | Self::Clone { path, .. } => path,
        }
    }

    /// クローン操作かどうかを判定
    pub fn is_clone(&self) -> bool {
        matches!(self, Self::Clone { .. })
    }

    /// ログ用の要約を取得
    pub fn describe(&self) -> String {
        match self {
            Self::Pull { path, branch } => format!("pull {} (branch {})", path, branch),
            Self::Push { path, branch, .. } => format!("push {} (branch {})", path, branch),
            Self::Clone { url, path, branch } => {
                format!("clone {} -> {} (branch {})", url, path, branch)
            }
        }
    }

    /// この操作が1つのコンソール上で順に実行するコマンド列を構築
    ///
    /// GitHubトークンが渡された場合、pullは資格情報ストアを先に仕込み、
    /// cloneはトークン埋め込みURLを使う。トークンを含むステップの
    /// `display` は常にマスクされる。
    pub fn command_sequence(&self, git_token: Option<&ApiToken>) -> Vec<PipelineStep> {
        match self {
            Self::Pull { path, branch } => {
                let mut steps = vec![PipelineStep::new(format!("cd {}", path))];

                if let Some(token) = git_token.filter(|t| !t.is_empty()) {
                    steps.push(PipelineStep::sensitive(
                        format!(
                            "git config --global credential.helper store ; \
                             echo 'https://{}@github.com' > ~/.git-credentials",
                            token.expose()
                        ),
                        "git config --global credential.helper store ; \
                         echo 'https://****@github.com' > ~/.git-credentials",
                    ));
                }

                // チェックアウトはベストエフォート。シェルの ; で連結し
                // stderrを捨てるので、ステップの成否はpullの終了状態で決まる。
                steps.push(PipelineStep::new(format!(
                    "git checkout {branch} 2>/dev/null ; git pull origin {branch}"
                )));
                steps
            }

            Self::Push {
                path,
                branch,
                message,
            } => {
                let message = message
                    .clone()
                    .unwrap_or_else(Self::default_commit_message);
                vec![
                    PipelineStep::new(format!("cd {}", path)),
                    PipelineStep::new("git add -A"),
                    PipelineStep::new(format!("git commit -m {}", shell_quote(&message))),
                    PipelineStep::new(format!("git push origin {}", branch)),
                ]
            }

            Self::Clone { url, path, branch } => {
                let clone_url = match git_token.filter(|t| !t.is_empty()) {
                    Some(token) => url.with_access_token(token),
                    None => url.as_str().to_string(),
                };
                let step = if clone_url == url.as_str() {
                    PipelineStep::new(format!("git clone -b {} {} {}", branch, clone_url, path))
                } else {
                    PipelineStep::sensitive(
                        format!("git clone -b {} {} {}", branch, clone_url, path),
                        format!(
                            "git clone -b {} {} {}",
                            branch,
                            url.with_access_token(&ApiToken::new("****")),
                            path
                        ),
                    )
                };
                vec![step]
            }
        }
    }

    /// タイムスタンプ付きのデフォルトコミットメッセージを生成
    pub fn default_commit_message() -> String {
        format!(
            "Automated commit from PythonAnywhere - {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// POSIXシェルのシングルクォートでエスケープする
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pull_operation() -> GitOperation {
        GitOperation::Pull {
            path: ProjectPath::new("/home/alice/blog").unwrap(),
            branch: BranchName::new("main").unwrap(),
        }
    }

    #[test]
    fn test_pull_sequence_without_token() {
        let steps = pull_operation().command_sequence(None);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].command, "cd /home/alice/blog");
        assert_eq!(
            steps[1].command,
            "git checkout main 2>/dev/null ; git pull origin main"
        );
        assert_eq!(steps[1].command, steps[1].display);
    }

    #[test]
    fn test_pull_sequence_with_token_masks_display() {
        let token = ApiToken::new("ghp_secret");
        let steps = pull_operation().command_sequence(Some(&token));

        assert_eq!(steps.len(), 3);
        assert!(steps[1].command.contains("credential.helper store"));
        assert!(steps[1].command.contains("ghp_secret"));
        assert!(!steps[1].display.contains("ghp_secret"));
        assert!(steps[1].display.contains("****"));
    }

    #[test]
    fn test_pull_sequence_ignores_empty_token() {
        let token = ApiToken::new("   ");
        let steps = pull_operation().command_sequence(Some(&token));
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_push_sequence_with_explicit_message() {
        let operation = GitOperation::Push {
            path: ProjectPath::new("/home/alice/blog").unwrap(),
            branch: BranchName::new("main").unwrap(),
            message: Some("update posts".to_string()),
        };

        let steps = operation.command_sequence(None);
        let commands: Vec<&str> = steps.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(
            commands,
            vec![
                "cd /home/alice/blog",
                "git add -A",
                "git commit -m 'update posts'",
                "git push origin main",
            ]
        );
    }

    #[test]
    fn test_push_default_message_has_timestamp() {
        let operation = GitOperation::Push {
            path: ProjectPath::new("/home/alice/blog").unwrap(),
            branch: BranchName::new("main").unwrap(),
            message: None,
        };

        let steps = operation.command_sequence(None);
        assert!(steps[2]
            .command
            .starts_with("git commit -m 'Automated commit from PythonAnywhere - "));
    }

    #[test]
    fn test_commit_message_quoting() {
        assert_eq!(shell_quote("simple"), "'simple'");
        assert_eq!(shell_quote("it's done"), "'it'\\''s done'");
    }

    #[test]
    fn test_clone_sequence_without_token() {
        let operation = GitOperation::Clone {
            url: RepoUrl::new("https://github.com/alice/blog.git").unwrap(),
            path: ProjectPath::new("/home/alice/blog").unwrap(),
            branch: BranchName::new("main").unwrap(),
        };

        let steps = operation.command_sequence(None);
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0].command,
            "git clone -b main https://github.com/alice/blog.git /home/alice/blog"
        );
        assert_eq!(steps[0].command, steps[0].display);
    }

    #[test]
    fn test_clone_sequence_with_token_rewrites_url() {
        let operation = GitOperation::Clone {
            url: RepoUrl::new("https://github.com/alice/blog.git").unwrap(),
            path: ProjectPath::new("/home/alice/blog").unwrap(),
            branch: BranchName::new("main").unwrap(),
        };

        let token = ApiToken::new("ghp_secret");
        let steps = operation.command_sequence(Some(&token));
        assert!(steps[0].command.contains("https://ghp_secret@github.com/"));
        assert!(!steps[0].display.contains("ghp_secret"));
        assert!(steps[0].display.contains("https://****@github.com/"));
    }

    #[test]
    fn test_operation_metadata() {
        let operation = pull_operation();
        assert_eq!(operation.kind(), "pull");
        assert_eq!(operation.target_path().as_str(), "/home/alice/blog");
        assert!(!operation.is_clone());
        assert_eq!(operation.describe(), "pull /home/alice/blog (branch main)");
    }
}
