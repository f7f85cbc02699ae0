//! Cloudflare REST API client
//!
//! Direct Cloudflare API v4 implementation of [`ControlPlane`]. Uses Bearer
//! token authentication; the token comes with each call so a single client
//! can serve many accounts.
//!
//! | operation | Cloudflare product |
//! |---|---|
//! | namespace | Workers for Platforms dispatch namespace |
//! | compute function | user Worker in the namespace (+ cron triggers) |
//! | database | D1 |
//! | bucket | R2 |
//! | custom hostname | SSL for SaaS custom hostnames |
//! | static hosting | Pages project |
//!
//! User Workers are reached through the platform's dispatch Worker rather
//! than zone routes, so route patterns travel as `packflow:route=` script
//! tags on the upload itself.

use crate::api::{
    ApiAccount, ApiBinding, ApiBucket, ApiCorsRule, ApiCustomHostname, ApiDatabase, ApiDnsRecord,
    ApiNamespace, ApiPagesProject, ApiQueryResult, ApiResponse, ApiScript, CorsPolicy,
    CreateBucketRequest, CreateCustomHostnameRequest, CreateDatabaseRequest,
    CreateDnsRecordRequest, CreateNamespaceRequest, CreatePagesProjectRequest, CronTrigger,
    PagesBuildConfig, PlainTextBinding, QueryRequest, ScriptMetadata, ScriptSettings,
    SslSettings,
};
use crate::error::{CloudflareError, Result};
use async_trait::async_trait;
use packflow_cloud::{
    Account, AccountContext, Binding, BucketInfo, BucketRequest, ControlPlane, CorsRule,
    Credentials, CustomHostnameInfo, DatabaseInfo, DatabaseRequest, DnsRecordInfo,
    DnsRecordRequest, FunctionInfo, FunctionUpload, HostingProjectInfo, HostingProjectRequest,
    NamespaceInfo, NamespaceRequest, QueryOutcome,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Workers runtime compatibility date sent with every upload
const COMPATIBILITY_DATE: &str = "2024-09-23";

const MAIN_MODULE: &str = "index.js";

const ROUTE_TAG_PREFIX: &str = "packflow:route=";

/// Cloudflare control-plane client
#[derive(Debug, Clone)]
pub struct CloudflareClient {
    client: reqwest::Client,
    api_base: String,
}

impl Default for CloudflareClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudflareClient {
    pub fn new() -> Self {
        Self::with_api_base(CLOUDFLARE_API_BASE)
    }

    /// Point the client at a different API root (proxies, tests)
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn account_url(&self, ctx: &AccountContext, path: &str) -> String {
        format!("{}/accounts/{}{}", self.api_base, ctx.account_id, path)
    }

    /// Send a request and unwrap the response envelope
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        token: &str,
    ) -> Result<T> {
        self.send_envelope(request, token)
            .await?
            .ok_or_else(|| CloudflareError::ApiError {
                code: 0,
                message: "response carried no result".to_string(),
            })
    }

    /// Send a request whose result payload is not needed
    async fn send_unit(&self, request: reqwest::RequestBuilder, token: &str) -> Result<()> {
        self.send_envelope::<serde_json::Value>(request, token)
            .await
            .map(|_| ())
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        token: &str,
    ) -> Result<Option<T>> {
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(CloudflareError::HttpStatus {
                    status: status.as_u16(),
                    message: body.chars().take(200).collect(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if status.is_success() && envelope.success {
            return Ok(envelope.result);
        }

        let (code, message) = envelope
            .errors
            .first()
            .map(|e| (e.code, e.message.clone()))
            .unwrap_or_else(|| (0, "Unknown error".to_string()));

        if status.is_success() {
            Err(CloudflareError::ApiError { code, message })
        } else {
            Err(CloudflareError::HttpStatus {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn script_url(&self, ctx: &AccountContext, namespace: &str, script: &str) -> String {
        self.account_url(
            ctx,
            &format!("/workers/dispatch/namespaces/{}/scripts/{}", namespace, script),
        )
    }

    async fn upload_script(
        &self,
        ctx: &AccountContext,
        namespace: &str,
        upload: &FunctionUpload,
    ) -> Result<FunctionInfo> {
        let url = self.script_url(ctx, namespace, &upload.name);

        let tags: Vec<String> = upload
            .tags
            .iter()
            .cloned()
            .chain(
                upload
                    .routes
                    .iter()
                    .map(|pattern| format!("{}{}", ROUTE_TAG_PREFIX, pattern)),
            )
            .collect();
        let metadata = ScriptMetadata {
            main_module: MAIN_MODULE,
            compatibility_date: COMPATIBILITY_DATE,
            tags: &tags,
            bindings: PlainTextBinding::from_env(&upload.env),
        };

        let form = Form::new()
            .part(
                "metadata",
                Part::text(serde_json::to_string(&metadata)?).mime_str("application/json")?,
            )
            .part(
                MAIN_MODULE,
                Part::text(upload.code.clone())
                    .file_name(MAIN_MODULE)
                    .mime_str("application/javascript+module")?,
            );

        let script: ApiScript = self
            .send(self.client.put(&url).multipart(form), ctx.token())
            .await?;

        Ok(FunctionInfo {
            id: script.id,
            name: upload.name.clone(),
        })
    }
}

#[async_trait]
impl ControlPlane for CloudflareClient {
    fn name(&self) -> &str {
        "cloudflare"
    }

    async fn list_accounts(&self, credentials: &Credentials) -> packflow_cloud::Result<Vec<Account>> {
        let url = self.url("/accounts");
        let accounts: Vec<ApiAccount> = self
            .send(self.client.get(&url), &credentials.api_token)
            .await?;

        Ok(accounts
            .into_iter()
            .map(|a| Account {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    async fn create_namespace(
        &self,
        ctx: &AccountContext,
        request: &NamespaceRequest,
    ) -> packflow_cloud::Result<NamespaceInfo> {
        let url = self.account_url(ctx, "/workers/dispatch/namespaces");
        let body = CreateNamespaceRequest {
            name: &request.name,
        };

        tracing::info!("Creating dispatch namespace: {}", request.name);
        let ns: ApiNamespace = self
            .send(self.client.post(&url).json(&body), ctx.token())
            .await?;

        Ok(NamespaceInfo {
            id: ns.namespace_id,
            name: ns.namespace_name,
        })
    }

    async fn upload_function(
        &self,
        ctx: &AccountContext,
        namespace: &str,
        upload: &FunctionUpload,
    ) -> packflow_cloud::Result<FunctionInfo> {
        tracing::info!("Uploading worker script: {}", upload.name);
        Ok(self.upload_script(ctx, namespace, upload).await?)
    }

    async fn set_schedule(
        &self,
        ctx: &AccountContext,
        namespace: &str,
        function: &str,
        cron: &str,
    ) -> packflow_cloud::Result<()> {
        let url = format!("{}/schedules", self.script_url(ctx, namespace, function));
        let body = [CronTrigger { cron }];

        tracing::debug!("Setting cron trigger for {}: {}", function, cron);
        Ok(self
            .send_unit(self.client.put(&url).json(&body), ctx.token())
            .await?)
    }

    async fn create_database(
        &self,
        ctx: &AccountContext,
        request: &DatabaseRequest,
    ) -> packflow_cloud::Result<DatabaseInfo> {
        let url = self.account_url(ctx, "/d1/database");
        let body = CreateDatabaseRequest {
            name: &request.name,
            primary_location_hint: request.location.as_deref(),
        };

        tracing::info!("Creating D1 database: {}", request.name);
        let db: ApiDatabase = self
            .send(self.client.post(&url).json(&body), ctx.token())
            .await?;

        Ok(DatabaseInfo {
            id: db.uuid,
            name: db.name,
        })
    }

    async fn execute_sql(
        &self,
        ctx: &AccountContext,
        database_id: &str,
        sql: &str,
    ) -> packflow_cloud::Result<QueryOutcome> {
        let url = self.account_url(ctx, &format!("/d1/database/{}/query", database_id));
        let body = QueryRequest { sql };

        tracing::debug!("Executing {} bytes of SQL on {}", sql.len(), database_id);
        let results: Vec<ApiQueryResult> = self
            .send(self.client.post(&url).json(&body), ctx.token())
            .await?;

        Ok(results
            .iter()
            .fold(QueryOutcome::default(), |mut acc, r| {
                acc.changes += r.meta.changes;
                acc.duration_ms += r.meta.duration;
                acc
            }))
    }

    async fn create_bucket(
        &self,
        ctx: &AccountContext,
        request: &BucketRequest,
    ) -> packflow_cloud::Result<BucketInfo> {
        let url = self.account_url(ctx, "/r2/buckets");
        let body = CreateBucketRequest {
            name: &request.name,
            storage_class: &request.storage_class,
        };

        tracing::info!("Creating R2 bucket: {}", request.name);
        let bucket: ApiBucket = self
            .send(self.client.post(&url).json(&body), ctx.token())
            .await?;

        Ok(BucketInfo {
            name: bucket.name,
            created_at: bucket.creation_date,
        })
    }

    async fn configure_bucket_cors(
        &self,
        ctx: &AccountContext,
        bucket: &str,
        rules: &[CorsRule],
    ) -> packflow_cloud::Result<()> {
        let url = self.account_url(ctx, &format!("/r2/buckets/{}/cors", bucket));
        let body = CorsPolicy {
            rules: rules.iter().map(ApiCorsRule::from).collect(),
        };

        tracing::debug!("Applying CORS policy to {}", bucket);
        Ok(self
            .send_unit(self.client.put(&url).json(&body), ctx.token())
            .await?)
    }

    async fn register_custom_hostname(
        &self,
        ctx: &AccountContext,
        zone_id: &str,
        hostname: &str,
    ) -> packflow_cloud::Result<CustomHostnameInfo> {
        let url = self.url(&format!("/zones/{}/custom_hostnames", zone_id));
        let body = CreateCustomHostnameRequest {
            hostname,
            ssl: SslSettings::default(),
        };

        tracing::info!("Registering custom hostname: {}", hostname);
        let ch: ApiCustomHostname = self
            .send(self.client.post(&url).json(&body), ctx.token())
            .await?;

        Ok(CustomHostnameInfo {
            id: ch.id,
            hostname: ch.hostname,
            status: ch.status,
        })
    }

    async fn create_dns_record(
        &self,
        ctx: &AccountContext,
        zone_id: &str,
        record: &DnsRecordRequest,
    ) -> packflow_cloud::Result<DnsRecordInfo> {
        let url = self.url(&format!("/zones/{}/dns_records", zone_id));
        let body = CreateDnsRecordRequest {
            r#type: &record.record_type,
            name: &record.name,
            content: &record.content,
            ttl: record.ttl,
            proxied: record.proxied,
        };

        tracing::info!(
            "Creating DNS record: {} {} -> {}",
            record.record_type,
            record.name,
            record.content
        );
        let r: ApiDnsRecord = self
            .send(self.client.post(&url).json(&body), ctx.token())
            .await?;

        Ok(DnsRecordInfo {
            id: r.id,
            name: r.name,
            record_type: r.r#type,
            content: r.content,
            ttl: Some(r.ttl),
            proxied: r.proxied,
        })
    }

    async fn create_hosting_project(
        &self,
        ctx: &AccountContext,
        request: &HostingProjectRequest,
    ) -> packflow_cloud::Result<HostingProjectInfo> {
        let url = self.account_url(ctx, "/pages/projects");
        let body = CreatePagesProjectRequest {
            name: &request.name,
            production_branch: &request.production_branch,
            build_config: PagesBuildConfig {
                build_command: request.build_command.as_deref(),
                destination_dir: request.output_dir.as_deref(),
                root_dir: request.root_dir.as_deref(),
            },
        };

        tracing::info!("Creating Pages project: {}", request.name);
        let project: ApiPagesProject = self
            .send(self.client.post(&url).json(&body), ctx.token())
            .await?;

        Ok(HostingProjectInfo {
            id: project.id,
            name: project.name,
            subdomain: project.subdomain,
        })
    }

    async fn configure_bindings(
        &self,
        ctx: &AccountContext,
        namespace: &str,
        function: &str,
        bindings: &[Binding],
    ) -> packflow_cloud::Result<()> {
        let url = self.account_url(
            ctx,
            &format!(
                "/workers/dispatch/namespaces/{}/scripts/{}/settings",
                namespace, function
            ),
        );
        let settings = ScriptSettings {
            bindings: bindings.iter().map(ApiBinding::from).collect(),
        };
        let form = Form::new().part(
            "settings",
            Part::text(serde_json::to_string(&settings).map_err(CloudflareError::from)?)
                .mime_str("application/json")
                .map_err(CloudflareError::from)?,
        );

        tracing::info!("Binding {} resource(s) to {}", bindings.len(), function);
        Ok(self
            .send_unit(self.client.patch(&url).multipart(form), ctx.token())
            .await?)
    }
}
