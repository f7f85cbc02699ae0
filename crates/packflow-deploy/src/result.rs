//! Deployment outcome
//!
//! Provisioners hand back [`ResourceHandle`]s; the orchestrator folds them
//! into a [`PartialDeployment`] while it runs and freezes that into a
//! [`DeploymentResult`] once every step has finished. On a fatal error the
//! accumulator travels inside the error instead.

use chrono::{DateTime, Utc};
use packflow_manifest::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resource that now exists in the target account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResource {
    pub name: String,
    pub id: String,
}

/// What a provisioner returns from `create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    pub kind: ResourceKind,
    pub name: String,
    /// Identifier assigned by the target account
    pub id: String,
}

impl ResourceHandle {
    pub fn new(kind: ResourceKind, name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            id: id.into(),
        }
    }
}

impl From<&ResourceHandle> for CreatedResource {
    fn from(handle: &ResourceHandle) -> Self {
        Self {
            name: handle.name.clone(),
            id: handle.id.clone(),
        }
    }
}

/// Per-deployment isolation namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceHandle {
    pub name: String,
    pub id: String,
}

/// A post-deploy hook that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookWarning {
    pub hook: String,
    pub message: String,
}

impl std::fmt::Display for HookWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hook '{}' failed: {}", self.hook, self.message)
    }
}

/// Hostnames resolved for a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub hostname: String,
    pub dashboard_url: String,
    pub api_endpoint: String,
    pub custom_domain: Option<String>,
}

impl Endpoints {
    pub fn for_hostname(hostname: impl Into<String>, custom: bool) -> Self {
        let hostname = hostname.into();
        Self {
            dashboard_url: format!("https://{}", hostname),
            api_endpoint: format!("api.{}", hostname),
            custom_domain: custom.then(|| hostname.clone()),
            hostname,
        }
    }
}

/// Everything created so far in a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDeployment {
    pub account_id: Option<String>,
    pub namespace: Option<NamespaceHandle>,
    pub functions: Vec<CreatedResource>,
    pub databases: Vec<CreatedResource>,
    pub buckets: Vec<CreatedResource>,
    pub custom_hostname: Option<CreatedResource>,
    pub dns_records: Vec<CreatedResource>,
    pub hosting: Option<CreatedResource>,
    /// Function name -> binding names pushed to it
    pub bindings: BTreeMap<String, Vec<String>>,
}

impl PartialDeployment {
    pub fn record(&mut self, handle: &ResourceHandle) {
        let created = CreatedResource::from(handle);
        match handle.kind {
            ResourceKind::ComputeFunction => self.functions.push(created),
            ResourceKind::Database => self.databases.push(created),
            ResourceKind::ObjectBucket => self.buckets.push(created),
            ResourceKind::CustomDomain => self.custom_hostname = Some(created),
            ResourceKind::DnsRecord => self.dns_records.push(created),
            ResourceKind::StaticHosting => self.hosting = Some(created),
            ResourceKind::PostDeployHook => {}
        }
    }

    /// Number of resources created, the namespace included
    pub fn resource_count(&self) -> usize {
        self.namespace.iter().count()
            + self.functions.len()
            + self.databases.len()
            + self.buckets.len()
            + self.custom_hostname.iter().count()
            + self.dns_records.len()
            + self.hosting.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_count() == 0
    }

    /// `(kind label, name, id)` for every created resource, in creation order
    pub fn inventory(&self) -> Vec<(&'static str, &str, &str)> {
        let mut items = Vec::new();
        if let Some(ns) = &self.namespace {
            items.push(("namespace", ns.name.as_str(), ns.id.as_str()));
        }
        let groups: [(&'static str, &[CreatedResource]); 3] = [
            ("function", self.functions.as_slice()),
            ("database", self.databases.as_slice()),
            ("bucket", self.buckets.as_slice()),
        ];
        for (label, list) in groups {
            items.extend(list.iter().map(|r| (label, r.name.as_str(), r.id.as_str())));
        }
        if let Some(ch) = &self.custom_hostname {
            items.push(("custom hostname", ch.name.as_str(), ch.id.as_str()));
        }
        items.extend(
            self.dns_records
                .iter()
                .map(|r| ("dns record", r.name.as_str(), r.id.as_str())),
        );
        if let Some(hosting) = &self.hosting {
            items.push(("hosting project", hosting.name.as_str(), hosting.id.as_str()));
        }
        items
    }

    /// Freeze into the final result
    pub(crate) fn finish(
        self,
        account_id: String,
        namespace: NamespaceHandle,
        endpoints: Endpoints,
        warnings: Vec<HookWarning>,
    ) -> DeploymentResult {
        DeploymentResult {
            account_id,
            namespace,
            functions: self.functions,
            databases: self.databases,
            buckets: self.buckets,
            custom_hostname: self.custom_hostname,
            dns_records: self.dns_records,
            hosting: self.hosting,
            bindings: self.bindings,
            hostname: endpoints.hostname,
            dashboard_url: endpoints.dashboard_url,
            api_endpoint: endpoints.api_endpoint,
            custom_domain: endpoints.custom_domain,
            warnings,
            completed_at: Utc::now(),
        }
    }
}

/// Consolidated outcome of a successful deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentResult {
    pub account_id: String,
    pub namespace: NamespaceHandle,
    pub functions: Vec<CreatedResource>,
    pub databases: Vec<CreatedResource>,
    pub buckets: Vec<CreatedResource>,
    /// Registered custom hostname, absent on the default hostname
    pub custom_hostname: Option<CreatedResource>,
    pub dns_records: Vec<CreatedResource>,
    pub hosting: Option<CreatedResource>,
    pub bindings: BTreeMap<String, Vec<String>>,
    pub hostname: String,
    pub dashboard_url: String,
    pub api_endpoint: String,
    pub custom_domain: Option<String>,
    pub warnings: Vec<HookWarning>,
    pub completed_at: DateTime<Utc>,
}

impl DeploymentResult {
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn database_names(&self) -> Vec<&str> {
        self.databases.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn bucket_names(&self) -> Vec<&str> {
        self.buckets.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sorts_by_kind() {
        let mut partial = PartialDeployment::default();
        partial.record(&ResourceHandle::new(ResourceKind::Database, "orders-db", "db-1"));
        partial.record(&ResourceHandle::new(ResourceKind::ObjectBucket, "uploads", "uploads"));
        partial.record(&ResourceHandle::new(ResourceKind::StaticHosting, "site", "p-1"));

        assert_eq!(partial.databases.len(), 1);
        assert_eq!(partial.buckets[0].name, "uploads");
        assert_eq!(partial.hosting.as_ref().map(|h| h.id.as_str()), Some("p-1"));
        assert_eq!(partial.resource_count(), 3);
    }

    #[test]
    fn test_inventory_order() {
        let mut partial = PartialDeployment {
            namespace: Some(NamespaceHandle {
                name: "shop-1".to_string(),
                id: "ns-1".to_string(),
            }),
            ..Default::default()
        };
        partial.record(&ResourceHandle::new(ResourceKind::ComputeFunction, "api", "fn-1"));
        partial.record(&ResourceHandle::new(ResourceKind::Database, "orders-db", "db-1"));

        let labels: Vec<_> = partial.inventory().iter().map(|(l, _, _)| *l).collect();
        assert_eq!(labels, vec!["namespace", "function", "database"]);
    }

    #[test]
    fn test_finish_keeps_every_resource() {
        let mut partial = PartialDeployment::default();
        partial.record(&ResourceHandle::new(ResourceKind::ComputeFunction, "api", "fn-1"));
        partial.record(&ResourceHandle::new(
            ResourceKind::CustomDomain,
            "shop.example.com",
            "ch-1",
        ));
        partial.record(&ResourceHandle::new(ResourceKind::DnsRecord, "www", "rec-1"));
        let count = partial.resource_count();

        let namespace = NamespaceHandle {
            name: "shop-1".to_string(),
            id: "ns-1".to_string(),
        };
        let result = partial.finish(
            "acc-1".to_string(),
            namespace,
            Endpoints::for_hostname("shop.example.com", true),
            vec![],
        );

        assert_eq!(
            result.custom_hostname.as_ref().map(|c| c.id.as_str()),
            Some("ch-1")
        );
        let kept = result.functions.len()
            + result.custom_hostname.iter().count()
            + result.dns_records.len();
        assert_eq!(kept, count);
    }

    #[test]
    fn test_endpoints() {
        let endpoints = Endpoints::for_hostname("shop.packflow.app", false);
        assert_eq!(endpoints.dashboard_url, "https://shop.packflow.app");
        assert_eq!(endpoints.api_endpoint, "api.shop.packflow.app");
        assert!(endpoints.custom_domain.is_none());

        let custom = Endpoints::for_hostname("shop.example.com", true);
        assert_eq!(custom.custom_domain.as_deref(), Some("shop.example.com"));
    }
}
