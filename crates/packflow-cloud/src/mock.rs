//! Scripted in-memory control plane
//!
//! Answers every call deterministically, records what was called, and can
//! be told to fail or stall on a specific operation and target.

use crate::error::{CloudError, Result};
use crate::provider::ControlPlane;
use crate::types::{
    Account, AccountContext, Binding, BucketInfo, BucketRequest, CorsRule, Credentials,
    CustomHostnameInfo, DatabaseInfo, DatabaseRequest, DnsRecordInfo, DnsRecordRequest,
    FunctionInfo, FunctionUpload, HostingProjectInfo, HostingProjectRequest, NamespaceInfo,
    NamespaceRequest, QueryOutcome,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

/// Control-plane operations, used to script and inspect the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListAccounts,
    CreateNamespace,
    UploadFunction,
    SetSchedule,
    CreateDatabase,
    ExecuteSql,
    CreateBucket,
    ConfigureBucketCors,
    RegisterCustomHostname,
    CreateDnsRecord,
    CreateHostingProject,
    ConfigureBindings,
}

/// A recorded call: the operation and the name it targeted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: Operation,
    pub target: String,
}

#[derive(Debug, Clone)]
struct Fault {
    operation: Operation,
    target: Option<String>,
    message: String,
}

impl Fault {
    fn matches(&self, operation: Operation, target: &str) -> bool {
        self.operation == operation && self.target.as_deref().is_none_or(|t| t == target)
    }
}

pub struct MockControlPlane {
    accounts: Vec<Account>,
    faults: Vec<Fault>,
    stalls: Vec<(Operation, Duration)>,
    calls: Mutex<Vec<Call>>,
    bindings: Mutex<BTreeMap<String, Vec<Binding>>>,
    schedules: Mutex<BTreeMap<String, String>>,
    sql: Mutex<Vec<(String, String)>>,
}

impl Default for MockControlPlane {
    fn default() -> Self {
        Self::new()
    }
}

impl MockControlPlane {
    /// One account, `acc-1`, and no faults
    pub fn new() -> Self {
        Self {
            accounts: vec![Account {
                id: "acc-1".to_string(),
                name: "Buyer Account".to_string(),
            }],
            faults: Vec::new(),
            stalls: Vec::new(),
            calls: Mutex::new(Vec::new()),
            bindings: Mutex::new(BTreeMap::new()),
            schedules: Mutex::new(BTreeMap::new()),
            sql: Mutex::new(Vec::new()),
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<Account>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Fail `operation` when it targets `target`
    pub fn fail_on(mut self, operation: Operation, target: impl Into<String>) -> Self {
        let target = target.into();
        self.faults.push(Fault {
            operation,
            message: format!("injected failure for {}", target),
            target: Some(target),
        });
        self
    }

    /// Fail every call of `operation`
    pub fn fail_all(mut self, operation: Operation) -> Self {
        self.faults.push(Fault {
            operation,
            target: None,
            message: format!("injected failure for {:?}", operation),
        });
        self
    }

    /// Sleep before answering `operation`
    pub fn stall_on(mut self, operation: Operation, delay: Duration) -> Self {
        self.stalls.push((operation, delay));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Targets of every recorded call of `operation`, in order
    pub fn targets(&self, operation: Operation) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .map(|c| c.target)
            .collect()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.targets(operation).len()
    }

    /// Bindings last pushed for `function`
    pub fn bindings_for(&self, function: &str) -> Option<Vec<Binding>> {
        self.bindings
            .lock()
            .ok()
            .and_then(|b| b.get(function).cloned())
    }

    /// Cron expression attached to `function`
    pub fn schedule_for(&self, function: &str) -> Option<String> {
        self.schedules
            .lock()
            .ok()
            .and_then(|s| s.get(function).cloned())
    }

    /// `(database_id, sql)` pairs in execution order
    pub fn executed_sql(&self) -> Vec<(String, String)> {
        self.sql.lock().map(|s| s.clone()).unwrap_or_default()
    }

    async fn record(&self, operation: Operation, target: &str) -> Result<()> {
        tracing::debug!(?operation, target, "mock control-plane call");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call {
                operation,
                target: target.to_string(),
            });
        }

        if let Some((_, delay)) = self.stalls.iter().find(|(op, _)| *op == operation) {
            tokio::time::sleep(*delay).await;
        }

        if let Some(fault) = self.faults.iter().find(|f| f.matches(operation, target)) {
            return Err(CloudError::ApiError(fault.message.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl ControlPlane for MockControlPlane {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_accounts(&self, _credentials: &Credentials) -> Result<Vec<Account>> {
        self.record(Operation::ListAccounts, "").await?;
        Ok(self.accounts.clone())
    }

    async fn create_namespace(
        &self,
        _ctx: &AccountContext,
        request: &NamespaceRequest,
    ) -> Result<NamespaceInfo> {
        self.record(Operation::CreateNamespace, &request.name).await?;
        Ok(NamespaceInfo {
            id: format!("ns-{}", request.name),
            name: request.name.clone(),
        })
    }

    async fn upload_function(
        &self,
        _ctx: &AccountContext,
        _namespace: &str,
        upload: &FunctionUpload,
    ) -> Result<FunctionInfo> {
        self.record(Operation::UploadFunction, &upload.name).await?;
        Ok(FunctionInfo {
            id: format!("fn-{}", upload.name),
            name: upload.name.clone(),
        })
    }

    async fn set_schedule(
        &self,
        _ctx: &AccountContext,
        _namespace: &str,
        function: &str,
        cron: &str,
    ) -> Result<()> {
        self.record(Operation::SetSchedule, function).await?;
        if let Ok(mut all) = self.schedules.lock() {
            all.insert(function.to_string(), cron.to_string());
        }
        Ok(())
    }

    async fn create_database(
        &self,
        _ctx: &AccountContext,
        request: &DatabaseRequest,
    ) -> Result<DatabaseInfo> {
        self.record(Operation::CreateDatabase, &request.name).await?;
        Ok(DatabaseInfo {
            id: format!("db-{}", request.name),
            name: request.name.clone(),
        })
    }

    async fn execute_sql(
        &self,
        _ctx: &AccountContext,
        database_id: &str,
        sql: &str,
    ) -> Result<QueryOutcome> {
        self.record(Operation::ExecuteSql, database_id).await?;
        if let Ok(mut log) = self.sql.lock() {
            log.push((database_id.to_string(), sql.to_string()));
        }
        Ok(QueryOutcome {
            changes: 1,
            duration_ms: 0.5,
        })
    }

    async fn create_bucket(
        &self,
        _ctx: &AccountContext,
        request: &BucketRequest,
    ) -> Result<BucketInfo> {
        self.record(Operation::CreateBucket, &request.name).await?;
        Ok(BucketInfo {
            name: request.name.clone(),
            created_at: None,
        })
    }

    async fn configure_bucket_cors(
        &self,
        _ctx: &AccountContext,
        bucket: &str,
        _rules: &[CorsRule],
    ) -> Result<()> {
        self.record(Operation::ConfigureBucketCors, bucket).await
    }

    async fn register_custom_hostname(
        &self,
        _ctx: &AccountContext,
        _zone_id: &str,
        hostname: &str,
    ) -> Result<CustomHostnameInfo> {
        self.record(Operation::RegisterCustomHostname, hostname).await?;
        Ok(CustomHostnameInfo {
            id: format!("ch-{}", hostname),
            hostname: hostname.to_string(),
            status: "pending".to_string(),
        })
    }

    async fn create_dns_record(
        &self,
        _ctx: &AccountContext,
        _zone_id: &str,
        record: &DnsRecordRequest,
    ) -> Result<DnsRecordInfo> {
        self.record(Operation::CreateDnsRecord, &record.name).await?;
        Ok(DnsRecordInfo {
            id: format!("dns-{}", record.name),
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            content: record.content.clone(),
            ttl: Some(record.ttl),
            proxied: record.proxied,
        })
    }

    async fn create_hosting_project(
        &self,
        _ctx: &AccountContext,
        request: &HostingProjectRequest,
    ) -> Result<HostingProjectInfo> {
        self.record(Operation::CreateHostingProject, &request.name).await?;
        Ok(HostingProjectInfo {
            id: format!("pages-{}", request.name),
            name: request.name.clone(),
            subdomain: Some(format!("{}.pages.dev", request.name)),
        })
    }

    async fn configure_bindings(
        &self,
        _ctx: &AccountContext,
        _namespace: &str,
        function: &str,
        bindings: &[Binding],
    ) -> Result<()> {
        self.record(Operation::ConfigureBindings, function).await?;
        if let Ok(mut all) = self.bindings.lock() {
            all.insert(function.to_string(), bindings.to_vec());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> AccountContext {
        AccountContext::new(Credentials::new("token"), "acc-1")
    }

    #[tokio::test]
    async fn test_records_calls() {
        let mock = MockControlPlane::new();
        let request = DatabaseRequest {
            name: "orders-db".to_string(),
            location: None,
        };
        let db = mock.create_database(&ctx(), &request).await.unwrap();
        assert_eq!(db.id, "db-orders-db");
        assert_eq!(mock.targets(Operation::CreateDatabase), vec!["orders-db"]);
    }

    #[tokio::test]
    async fn test_targeted_fault() {
        let mock = MockControlPlane::new().fail_on(Operation::CreateBucket, "logs");
        let ok = BucketRequest {
            name: "uploads".to_string(),
            storage_class: "Standard".to_string(),
        };
        let bad = BucketRequest {
            name: "logs".to_string(),
            storage_class: "Standard".to_string(),
        };
        assert!(mock.create_bucket(&ctx(), &ok).await.is_ok());
        assert!(mock.create_bucket(&ctx(), &bad).await.is_err());
        assert_eq!(mock.call_count(Operation::CreateBucket), 2);
    }

    #[test]
    fn test_blocking_use() {
        let mock = MockControlPlane::new().fail_all(Operation::ListAccounts);
        let result = tokio_test::block_on(mock.list_accounts(&Credentials::new("token")));
        assert!(matches!(result, Err(CloudError::ApiError(_))));
    }
}
