//! Cloudflare API v4 wire types

use packflow_cloud::{Binding, CorsRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiAccount {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateNamespaceRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiNamespace {
    pub namespace_id: String,
    pub namespace_name: String,
}

/// `metadata` part of a module worker upload
#[derive(Debug, Serialize)]
pub(crate) struct ScriptMetadata<'a> {
    pub main_module: &'a str,
    pub compatibility_date: &'a str,
    pub tags: &'a [String],
    pub bindings: Vec<PlainTextBinding<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlainTextBinding<'a> {
    #[serde(rename = "type")]
    pub r#type: &'static str,
    pub name: &'a str,
    pub text: &'a str,
}

impl<'a> PlainTextBinding<'a> {
    pub fn from_env(env: &'a BTreeMap<String, String>) -> Vec<Self> {
        env.iter()
            .map(|(name, text)| Self {
                r#type: "plain_text",
                name,
                text,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiScript {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CronTrigger<'a> {
    pub cron: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDatabaseRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_location_hint: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDatabase {
    pub uuid: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub sql: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiQueryResult {
    #[serde(default)]
    pub meta: ApiQueryMeta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiQueryMeta {
    #[serde(default)]
    pub changes: u64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBucketRequest<'a> {
    pub name: &'a str,
    pub storage_class: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiBucket {
    pub name: String,
    #[serde(default)]
    pub creation_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CorsPolicy {
    pub rules: Vec<ApiCorsRule>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiCorsRule {
    pub allowed: ApiCorsAllowed,
    pub max_age_seconds: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiCorsAllowed {
    pub origins: Vec<String>,
    pub methods: Vec<String>,
    pub headers: Vec<String>,
}

impl From<&CorsRule> for ApiCorsRule {
    fn from(rule: &CorsRule) -> Self {
        Self {
            allowed: ApiCorsAllowed {
                origins: rule.allowed_origins.clone(),
                methods: rule.allowed_methods.clone(),
                headers: rule.allowed_headers.clone(),
            },
            max_age_seconds: rule.max_age_seconds,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCustomHostnameRequest<'a> {
    pub hostname: &'a str,
    pub ssl: SslSettings,
}

#[derive(Debug, Serialize)]
pub(crate) struct SslSettings {
    pub method: &'static str,
    #[serde(rename = "type")]
    pub r#type: &'static str,
}

impl Default for SslSettings {
    fn default() -> Self {
        Self {
            method: "http",
            r#type: "dv",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCustomHostname {
    pub id: String,
    pub hostname: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDnsRecordRequest<'a> {
    #[serde(rename = "type")]
    pub r#type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
    pub proxied: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDnsRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePagesProjectRequest<'a> {
    pub name: &'a str,
    pub production_branch: &'a str,
    pub build_config: PagesBuildConfig<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PagesBuildConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_dir: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPagesProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subdomain: Option<String>,
}

/// `settings` part of a script settings patch
#[derive(Debug, Serialize)]
pub(crate) struct ScriptSettings {
    pub bindings: Vec<ApiBinding>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub(crate) enum ApiBinding {
    #[serde(rename = "d1")]
    D1 { name: String, id: String },
    #[serde(rename = "r2_bucket")]
    R2Bucket { name: String, bucket_name: String },
}

impl From<&Binding> for ApiBinding {
    fn from(binding: &Binding) -> Self {
        match binding {
            Binding::Database { name, database_id } => ApiBinding::D1 {
                name: name.clone(),
                id: database_id.clone(),
            },
            Binding::Bucket { name, bucket_name } => ApiBinding::R2Bucket {
                name: name.clone(),
                bucket_name: bucket_name.clone(),
            },
        }
    }
}
