//! Test fixtures for creating test data
//!
//! Reusable credentials, configuration files, and operation values for the
//! integration tests.

use pawgit::domain::entities::credentials::{ApiToken, Credentials};
use pawgit::domain::entities::git_operation::GitOperation;
use pawgit::domain::value_objects::branch_name::BranchName;
use pawgit::domain::value_objects::project_path::ProjectPath;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for credentials
pub struct CredentialsFixture;

impl CredentialsFixture {
    /// Credentials that create an ephemeral console per operation
    pub fn ephemeral() -> Credentials {
        Credentials::new(
            "alice",
            ApiToken::new("test-api-token"),
            "www.pythonanywhere.com",
        )
    }

    /// Credentials bound to a persistent console
    pub fn persistent(console_id: u64) -> Credentials {
        Self::ephemeral().with_console_id(console_id)
    }

    /// Credentials carrying a GitHub access token
    pub fn with_git_token() -> Credentials {
        Self::ephemeral().with_git_token(ApiToken::new("ghp_test_token"))
    }
}

/// Test fixture for git operations
pub struct OperationFixture;

impl OperationFixture {
    /// A pull of /home/alice/blog on main
    pub fn pull() -> GitOperation {
        GitOperation::Pull {
            path: ProjectPath::new("/home/alice/blog").unwrap(),
            branch: BranchName::default_branch(),
        }
    }

    /// A push of /home/alice/blog on main with an explicit message
    pub fn push(message: Option<&str>) -> GitOperation {
        GitOperation::Push {
            path: ProjectPath::new("/home/alice/blog").unwrap(),
            branch: BranchName::default_branch(),
            message: message.map(str::to_string),
        }
    }
}

/// Test fixture for YAML config files
pub struct ConfigFileFixture;

impl ConfigFileFixture {
    /// Write the given YAML into a fresh temporary directory and return the
    /// directory guard together with the file path
    pub fn write(yaml: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pawgit.yaml");
        std::fs::write(&path, yaml).unwrap();
        (dir, path)
    }

    /// A complete config with credentials and three projects
    pub fn full() -> (TempDir, PathBuf) {
        Self::write(
            r#"
pythonanywhere:
  username: file-user
  token: file-token
  host: eu.pythonanywhere.com
  console_id: 777
  git_token: ghp_from_file
projects:
  blog:
    path: /home/file-user/blog
    branch: main
  zulu:
    path: /home/file-user/zulu
  api:
    path: /home/file-user/api
    branch: release
    repo_url: https://github.com/file-user/api.git
"#,
        )
    }
}
