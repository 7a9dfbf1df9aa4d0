//! # pawgit - Remote git operations for PythonAnywhere
//!
//! `pawgit` runs git pull, push, and clone inside a PythonAnywhere bash
//! console, driven entirely through the provider's HTTP API. It exists for
//! accounts where there is no SSH access: the only way to execute a command
//! remotely is to type it into a web console and read the accumulated output
//! back.
//!
//! ## Features
//!
//! - **Pull / Push / Clone**: The three core git operations, expanded into
//!   deterministic command pipelines and executed sequentially on one console
//! - **Completion detection**: A unique sentinel plus the shell's `$?`
//!   expansion turns an append-only text stream into reliable exit statuses
//! - **Console lifecycle**: Bind to a persistent console or create an
//!   ephemeral one that is always cleaned up afterwards
//! - **Multi-project deploy**: Pull every configured project in one run
//! - **Retry with backoff**: Transient failures (network, console readiness)
//!   are retried; git failures never are
//!
//! ## Quick Start
//!
//! 1. Create a config file (`pawgit.yaml`):
//!
//! ```yaml
//! pythonanywhere:
//!   username: alice
//!   token: your-api-token
//!   host: www.pythonanywhere.com
//! projects:
//!   blog:
//!     path: /home/alice/blog
//!     branch: main
//! ```
//!
//! 2. Pull a project:
//!
//! ```bash
//! pawgit -c pawgit.yaml pull --path /home/alice/blog
//! ```
//!
//! 3. Or deploy everything:
//!
//! ```bash
//! pawgit -c pawgit.yaml deploy
//! ```
//!
//! Credentials can also come from `PAW_USERNAME`, `PAW_TOKEN` and `PAW_HOST`;
//! environment variables override the file per-field.
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Git operations, credentials, consoles, and validated values
//! - [`application`]: Use cases and credential resolution
//! - [`infrastructure`]: Provider HTTP API, the completion protocol, retry
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: Shared error and result types
//!
//! ## The Completion Protocol
//!
//! A PythonAnywhere console offers no exit codes, only an append-only text
//! buffer. Each command is therefore submitted as
//! `<command> ; echo <sentinel> $?` and the output suffix past a recorded
//! baseline is polled until the sentinel appears with the substituted status:
//!
//! - [`infrastructure::console::completion`]: sentinel generation and the
//!   pure [`detect_completion`](infrastructure::console::detect_completion)
//!   scanner
//! - [`infrastructure::console::classifier`]: turns exit status plus output
//!   substrings into a success/failure verdict ("nothing to commit" is
//!   success, `fatal:` is failure even with status 0)
//! - [`infrastructure::console::executor`]: the per-command poll loop and
//!   fail-fast pipeline runner
//!
//! ## Error Handling
//!
//! - [`common::error::PawgitError`]: Main error type; its
//!   [`is_transient`](common::error::PawgitError::is_transient) split drives
//!   the retry policy
//! - [`common::result::PawgitResult`]: Type alias for `Result<T, PawgitError>`
//!
//! ## Examples
//!
//! ### Using the Library
//!
//! ```rust,no_run
//! use pawgit::application::use_cases::run_git_operation::{
//!     GitOperationConfig, RunGitOperationUseCase,
//! };
//! use pawgit::domain::entities::credentials::{ApiToken, Credentials};
//! use pawgit::domain::entities::git_operation::GitOperation;
//! use pawgit::domain::value_objects::branch_name::BranchName;
//! use pawgit::domain::value_objects::project_path::ProjectPath;
//! use pawgit::infrastructure::api::ApiClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = Credentials::new(
//!     "alice",
//!     ApiToken::new("api-token"),
//!     "www.pythonanywhere.com",
//! );
//! let api = Arc::new(ApiClient::new(&credentials)?);
//!
//! let operation = GitOperation::Pull {
//!     path: ProjectPath::new("/home/alice/blog")?,
//!     branch: BranchName::default_branch(),
//! };
//!
//! let use_case = RunGitOperationUseCase::new(api, GitOperationConfig::default());
//! let result = use_case.execute(&credentials, &operation).await?;
//!
//! println!("succeeded: {}", result.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ### Resolving Credentials
//!
//! ```rust,no_run
//! use pawgit::application::services::credential_service::CredentialResolver;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resolver = CredentialResolver::from_process_env();
//! let credentials = resolver.resolve(Some(Path::new("pawgit.yaml"))).await?;
//!
//! println!("resolved for {}", credentials.username);
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::PawgitError;
pub use crate::common::result::PawgitResult as Result;
