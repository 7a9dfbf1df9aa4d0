//! ドメインエンティティ
//!
//! 認証情報、コンソール、git操作などツールの中心的な概念を表す型。

pub mod config_file;
pub mod console;
pub mod credentials;
pub mod git_operation;

pub use config_file::{ConfigFile, ProjectEntry, ProviderSection};
pub use console::{Console, ConsoleInfo, ConsoleOrigin, ConsoleState, CpuUsage};
pub use credentials::{ApiToken, Credentials};
pub use git_operation::{GitOperation, PipelineStep};
