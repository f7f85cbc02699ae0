//! Post-deploy hooks
//!
//! Hooks run after every resource exists. A failing hook never fails the
//! deployment; the orchestrator turns it into a warning on the result.

use async_trait::async_trait;
use packflow_manifest::{HookKind, HookSpec};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Invalid hook configuration: {0}")]
    InvalidConfig(String),

    #[error("Hook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Hook endpoint {url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}

/// What hooks are told about the finished deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentSummary {
    pub event: &'static str,
    pub package: String,
    pub slug: String,
    pub version: String,
    pub account_id: String,
    pub namespace: String,
    pub hostname: String,
    pub dashboard_url: String,
    pub api_endpoint: String,
    pub functions: Vec<String>,
    pub databases: Vec<String>,
    pub buckets: Vec<String>,
}

impl DeploymentSummary {
    pub const EVENT: &'static str = "deployment.completed";

    /// Plain-text rendering used for email bodies
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{} {} is live at {}\n\nAPI: {}\nNamespace: {}\n",
            self.package, self.version, self.dashboard_url, self.api_endpoint, self.namespace
        );
        for (label, names) in [
            ("Functions", &self.functions),
            ("Databases", &self.databases),
            ("Buckets", &self.buckets),
        ] {
            if !names.is_empty() {
                text.push_str(&format!("{}: {}\n", label, names.join(", ")));
            }
        }
        text
    }
}

#[async_trait]
pub trait HookRunner: Send + Sync {
    async fn run(&self, hook: &HookSpec, summary: &DeploymentSummary) -> Result<(), HookError>;
}

/// Skips every hook
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHookRunner;

#[async_trait]
impl HookRunner for NoopHookRunner {
    async fn run(&self, hook: &HookSpec, _summary: &DeploymentSummary) -> Result<(), HookError> {
        tracing::debug!("Skipping hook {}", hook.name);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    to: &'a str,
    subject: String,
    body: String,
}

/// Runs hooks over HTTP
///
/// - `webhook`: POST the summary to `config.url`
/// - `function`: POST the summary to `https://{api_endpoint}{config.path}`
/// - `email`: POST `{to, subject, body}` to `config.endpoint`
#[derive(Debug, Clone)]
pub struct HttpHookRunner {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for HttpHookRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpHookRunner {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<(), HookError> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HookError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

fn required<'a>(hook: &'a HookSpec, key: &str) -> Result<&'a str, HookError> {
    hook.config_str(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            HookError::InvalidConfig(format!(
                "{} hook '{}' needs config.{}",
                hook.kind, hook.name, key
            ))
        })
}

/// URL a `function` hook calls on the deployment's own API
pub fn function_url(api_endpoint: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("https://{}{}", api_endpoint, path)
    } else {
        format!("https://{}/{}", api_endpoint, path)
    }
}

#[async_trait]
impl HookRunner for HttpHookRunner {
    async fn run(&self, hook: &HookSpec, summary: &DeploymentSummary) -> Result<(), HookError> {
        match hook.kind {
            HookKind::Webhook => {
                let url = required(hook, "url")?;
                self.post(url, summary).await
            }
            HookKind::Function => {
                let path = required(hook, "path")?;
                self.post(&function_url(&summary.api_endpoint, path), summary)
                    .await
            }
            HookKind::Email => {
                let endpoint = required(hook, "endpoint")?;
                let to = required(hook, "to")?;
                let subject = hook
                    .config_str("subject")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} is deployed", summary.package));
                let email = EmailRequest {
                    to,
                    subject,
                    body: summary.to_text(),
                };
                self.post(endpoint, &email).await
            }
        }
    }
}
