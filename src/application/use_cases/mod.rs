//! ユースケース
//!
//! CLIコマンドから呼び出される、このツールの主要な操作。

pub mod check_connection;
pub mod deploy_projects;
pub mod run_git_operation;

pub use check_connection::{CheckConnectionUseCase, ConnectionReport};
pub use deploy_projects::{DeployProjectsUseCase, DeployResult, ProjectDeployResult};
pub use run_git_operation::{GitOperationConfig, RunGitOperationUseCase};
