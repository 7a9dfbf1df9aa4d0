//! PythonAnywhere console API client.
//!
//! Thin reqwest wrapper around the handful of endpoints the tool needs.
//! The auth token lives only in the default headers and is marked sensitive;
//! no log line ever contains it.

use crate::common::error::PawgitError;
use crate::common::result::PawgitResult;
use crate::domain::entities::console::{ConsoleInfo, CpuUsage};
use crate::domain::entities::credentials::Credentials;
use crate::infrastructure::api::console_api::ConsoleApi;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

/// HTTP implementation of [`ConsoleApi`].
pub struct ApiClient {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Deserialize)]
struct LatestOutput {
    output: String,
}

impl ApiClient {
    /// Create a client with default settings.
    pub fn new(credentials: &Credentials) -> PawgitResult<Self> {
        Self::with_config(credentials, ApiClientConfig::default())
    }

    /// Create a client with explicit settings.
    pub fn with_config(
        credentials: &Credentials,
        config: ApiClientConfig,
    ) -> PawgitResult<Self> {
        if !credentials.is_pythonanywhere_host() {
            warn!(
                host = credentials.normalized_host(),
                "host is not a pythonanywhere.com domain, using the US endpoint"
            );
        }

        let mut headers = HeaderMap::new();
        let mut auth_value =
            HeaderValue::from_str(&format!("Token {}", credentials.token().expose())).map_err(
                |_| {
                    PawgitError::config_error(
                        "API token contains characters not allowed in an HTTP header",
                    )
                },
            )?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            api_base: credentials.api_base(),
        })
    }

    /// Base URL this client talks to (no trailing slash).
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn console_url(&self, console_id: u64, suffix: &str) -> String {
        format!("{}/consoles/{}/{}", self.api_base, console_id, suffix)
    }

    fn request_failed(url: &str) -> impl FnOnce(reqwest::Error) -> PawgitError + '_ {
        move |error| {
            PawgitError::network_error_with_source(
                "Console API request failed",
                Some(url.to_string()),
                error,
            )
        }
    }

    async fn expect_status(
        response: reqwest::Response,
        url: &str,
        expected: StatusCode,
    ) -> PawgitResult<reqwest::Response> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status.as_u16(), url, &body))
    }
}

/// Map an unexpected HTTP status onto the error taxonomy.
///
/// 401/403 are fatal authentication problems, 412 means the console was
/// created but never started, 429 and 5xx are transient, any other status is
/// a bug worth surfacing as-is.
fn classify_status(status: u16, url: &str, body: &str) -> PawgitError {
    let body_excerpt: String = body.chars().take(200).collect();
    match status {
        401 | 403 => PawgitError::auth_error(format!(
            "console API rejected the token (HTTP {status})"
        )),
        412 => PawgitError::console_unavailable(
            "console has not been started yet (HTTP 412)",
            None,
        ),
        429 => PawgitError::network_error(
            "console API rate limit exceeded (HTTP 429)",
            Some(url.to_string()),
        ),
        500..=599 => PawgitError::network_error(
            format!("console API server error (HTTP {status})"),
            Some(url.to_string()),
        ),
        _ => PawgitError::internal_error(format!(
            "unexpected console API response (HTTP {status}): {body_excerpt}"
        )),
    }
}

#[async_trait]
impl ConsoleApi for ApiClient {
    async fn create_console(&self) -> PawgitResult<ConsoleInfo> {
        let url = format!("{}/consoles/", self.api_base);
        debug!(%url, "creating console");

        let response = self
            .client
            .post(&url)
            .json(&json!({"executable": "bash", "arguments": ""}))
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        let response = Self::expect_status(response, &url, StatusCode::CREATED).await?;
        let info: ConsoleInfo = response.json().await.map_err(Self::request_failed(&url))?;
        debug!(console_id = info.id, "console created");
        Ok(info)
    }

    async fn console_info(&self, console_id: u64) -> PawgitResult<Option<ConsoleInfo>> {
        let url = self.console_url(console_id, "");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::expect_status(response, &url, StatusCode::OK).await?;
        let info: ConsoleInfo = response.json().await.map_err(Self::request_failed(&url))?;
        Ok(Some(info))
    }

    async fn send_input(&self, console_id: u64, input: &str) -> PawgitResult<()> {
        let url = self.console_url(console_id, "send_input/");
        let response = self
            .client
            .post(&url)
            .json(&json!({"input": format!("{input}\n")}))
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        if response.status() == StatusCode::PRECONDITION_FAILED {
            return Err(PawgitError::console_unavailable(
                "console exists but was never started; open it once in a browser tab",
                Some(console_id),
            ));
        }
        Self::expect_status(response, &url, StatusCode::OK).await?;
        Ok(())
    }

    async fn latest_output(&self, console_id: u64) -> PawgitResult<String> {
        let url = self.console_url(console_id, "get_latest_output/");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        let response = Self::expect_status(response, &url, StatusCode::OK).await?;
        let payload: LatestOutput = response.json().await.map_err(Self::request_failed(&url))?;
        Ok(payload.output)
    }

    async fn destroy_console(&self, console_id: u64) -> PawgitResult<()> {
        let url = self.console_url(console_id, "");
        debug!(console_id, "destroying console");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status.as_u16(), &url, &body))
    }

    async fn list_consoles(&self) -> PawgitResult<Vec<ConsoleInfo>> {
        let url = format!("{}/consoles/", self.api_base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        let response = Self::expect_status(response, &url, StatusCode::OK).await?;
        let consoles: Vec<ConsoleInfo> =
            response.json().await.map_err(Self::request_failed(&url))?;
        Ok(consoles)
    }

    async fn cpu_usage(&self) -> PawgitResult<CpuUsage> {
        let url = format!("{}/cpu/", self.api_base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        let response = Self::expect_status(response, &url, StatusCode::OK).await?;
        let usage: CpuUsage = response.json().await.map_err(Self::request_failed(&url))?;
        Ok(usage)
    }

    async fn path_exists(&self, path: &str) -> PawgitResult<bool> {
        let url = format!("{}/files/path{}", self.api_base, path);
        debug!(%url, "probing remote path");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::request_failed(&url))?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status.as_u16(), &url, &body))
    }
}
