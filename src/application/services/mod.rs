//! アプリケーションサービス
//!
//! ユースケースから利用される横断的なサービス群。

pub mod credential_service;

pub use credential_service::{
    CredentialResolver, CredentialServiceError, ResolvedProject, ENV_CONSOLE_ID, ENV_GIT_TOKEN,
    ENV_HOST, ENV_PROJECT_PATH, ENV_TOKEN, ENV_USERNAME,
};
