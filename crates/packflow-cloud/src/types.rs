//! Typed requests and responses for control-plane operations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API credentials for a target account
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub api_token: String,

    /// Preferred account when the token can reach several
    pub account_id: Option<String>,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            account_id: None,
        }
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"***")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Credentials bound to one verified account
#[derive(Debug, Clone)]
pub struct AccountContext {
    pub credentials: Credentials,
    pub account_id: String,
}

impl AccountContext {
    pub fn new(credentials: Credentials, account_id: impl Into<String>) -> Self {
        Self {
            credentials,
            account_id: account_id.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.credentials.api_token
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// Isolation namespace for one deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRequest {
    pub name: String,

    /// Audit tags (`key=value`)
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub id: String,
    pub name: String,
}

/// Compute function upload (code + metadata)
///
/// Everything here lands in a single create call. The cron schedule is
/// attached afterwards with [`ControlPlane::set_schedule`](crate::ControlPlane::set_schedule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionUpload {
    pub name: String,
    pub code: String,
    /// Route patterns with the hostname already substituted
    pub routes: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRequest {
    pub name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub id: String,
    pub name: String,
}

/// Result of running a SQL payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub changes: u64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRequest {
    pub name: String,
    pub storage_class: String,
}

/// Buckets are addressed by name; there is no separate id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    pub name: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsRule {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age_seconds: u32,
}

impl CorsRule {
    /// Any origin may GET/PUT/POST/HEAD with any header
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "PUT", "POST", "HEAD"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: vec!["*".to_string()],
            max_age_seconds: 3600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHostnameInfo {
    pub id: String,
    pub hostname: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordRequest {
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

/// DNS record information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordInfo {
    pub id: String,
    pub name: String,
    pub record_type: String,
    pub content: String,
    pub ttl: Option<u32>,
    pub proxied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingProjectRequest {
    pub name: String,
    pub production_branch: String,
    pub build_command: Option<String>,
    pub output_dir: Option<String>,
    pub root_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingProjectInfo {
    pub id: String,
    pub name: String,
    /// Default hostname assigned by the platform
    pub subdomain: Option<String>,
}

/// Named reference from a compute function to another resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Binding {
    Database { name: String, database_id: String },
    Bucket { name: String, bucket_name: String },
}

impl Binding {
    pub fn name(&self) -> &str {
        match self {
            Binding::Database { name, .. } | Binding::Bucket { name, .. } => name,
        }
    }
}
