//! 値オブジェクト
//!
//! コンソールのコマンドラインへ埋め込まれる値は、生成時に検証される
//! 不変の型として扱う。

pub mod branch_name;
pub mod project_path;
pub mod repo_url;

pub use branch_name::{BranchName, BranchNameError};
pub use project_path::{ProjectPath, ProjectPathError};
pub use repo_url::{RepoUrl, RepoUrlError};
