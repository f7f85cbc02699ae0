//! Control-plane client trait definition

use crate::error::Result;
use crate::types::{
    Account, AccountContext, Binding, BucketInfo, BucketRequest, CorsRule, Credentials,
    CustomHostnameInfo, DatabaseInfo, DatabaseRequest, DnsRecordInfo, DnsRecordRequest,
    FunctionInfo, FunctionUpload, HostingProjectInfo, HostingProjectRequest, NamespaceInfo,
    NamespaceRequest, QueryOutcome,
};
use async_trait::async_trait;

/// Control-plane client abstraction
///
/// Every target cloud implements this trait so the orchestrator can drive
/// provisioning without knowing the vendor API. Implementations hold no
/// per-account state: credentials travel with each call, which lets one
/// client serve concurrent deployments into different accounts.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Returns the provider name (e.g., "cloudflare")
    fn name(&self) -> &str;

    /// Accounts reachable with the given credentials
    async fn list_accounts(&self, credentials: &Credentials) -> Result<Vec<Account>>;

    /// Create an isolation namespace
    async fn create_namespace(
        &self,
        ctx: &AccountContext,
        request: &NamespaceRequest,
    ) -> Result<NamespaceInfo>;

    /// Upload a compute function into a namespace
    async fn upload_function(
        &self,
        ctx: &AccountContext,
        namespace: &str,
        upload: &FunctionUpload,
    ) -> Result<FunctionInfo>;

    /// Attach a cron trigger to a function already in `namespace`
    async fn set_schedule(
        &self,
        ctx: &AccountContext,
        namespace: &str,
        function: &str,
        cron: &str,
    ) -> Result<()>;

    async fn create_database(
        &self,
        ctx: &AccountContext,
        request: &DatabaseRequest,
    ) -> Result<DatabaseInfo>;

    /// Execute a SQL payload against a database
    async fn execute_sql(
        &self,
        ctx: &AccountContext,
        database_id: &str,
        sql: &str,
    ) -> Result<QueryOutcome>;

    async fn create_bucket(&self, ctx: &AccountContext, request: &BucketRequest)
    -> Result<BucketInfo>;

    async fn configure_bucket_cors(
        &self,
        ctx: &AccountContext,
        bucket: &str,
        rules: &[CorsRule],
    ) -> Result<()>;

    /// Register a buyer-owned hostname against a zone
    async fn register_custom_hostname(
        &self,
        ctx: &AccountContext,
        zone_id: &str,
        hostname: &str,
    ) -> Result<CustomHostnameInfo>;

    async fn create_dns_record(
        &self,
        ctx: &AccountContext,
        zone_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecordInfo>;

    async fn create_hosting_project(
        &self,
        ctx: &AccountContext,
        request: &HostingProjectRequest,
    ) -> Result<HostingProjectInfo>;

    /// Replace the bindings of a compute function
    async fn configure_bindings(
        &self,
        ctx: &AccountContext,
        namespace: &str,
        function: &str,
        bindings: &[Binding],
    ) -> Result<()>;
}
