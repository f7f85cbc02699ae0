//! Root manifest aggregate

use super::{
    BucketSpec, ComputeFunctionSpec, DatabaseSpec, DnsRecordSpec, DomainSpec, HookSpec,
    PackageInfo, StaticHostingSpec, Tier,
};
use crate::error::ValidationIssue;
use crate::validate::validate_parts;
use serde::{Deserialize, Serialize};

/// Resource section of a manifest, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Resources {
    #[serde(default)]
    pub compute_functions: Vec<ComputeFunctionSpec>,

    #[serde(default)]
    pub databases: Vec<DatabaseSpec>,

    #[serde(default)]
    pub object_buckets: Vec<BucketSpec>,

    #[serde(default)]
    pub dns_records: Vec<DnsRecordSpec>,

    #[serde(
        rename = "staticHostingProject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub static_hosting: Option<StaticHostingSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<DomainSpec>,

    #[serde(default)]
    pub post_deploy_hooks: Vec<HookSpec>,
}

/// A validated, read-only resource manifest.
///
/// Only obtainable through [`crate::ManifestBuilder::build`] or
/// [`crate::parse`], so every instance has passed validation and carries
/// unique resource names per kind. Serializes to the canonical document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceManifest {
    id: String,
    name: String,
    slug: String,
    version: String,
    description: String,
    price: u64,
    tier: Tier,
    resources: Resources,
}

impl ResourceManifest {
    pub(crate) fn from_parts(
        id: String,
        info: PackageInfo,
        price: u64,
        tier: Tier,
        resources: Resources,
    ) -> Self {
        Self {
            id,
            name: info.name,
            slug: info.slug,
            version: info.version,
            description: info.description,
            price,
            tier,
            resources,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn compute_functions(&self) -> &[ComputeFunctionSpec] {
        &self.resources.compute_functions
    }

    pub fn databases(&self) -> &[DatabaseSpec] {
        &self.resources.databases
    }

    pub fn object_buckets(&self) -> &[BucketSpec] {
        &self.resources.object_buckets
    }

    pub fn dns_records(&self) -> &[DnsRecordSpec] {
        &self.resources.dns_records
    }

    pub fn static_hosting(&self) -> Option<&StaticHostingSpec> {
        self.resources.static_hosting.as_ref()
    }

    pub fn custom_domain(&self) -> Option<&DomainSpec> {
        self.resources.custom_domain.as_ref()
    }

    pub fn post_deploy_hooks(&self) -> &[HookSpec] {
        &self.resources.post_deploy_hooks
    }

    /// Package info view of this manifest
    pub fn info(&self) -> PackageInfo {
        PackageInfo {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            slug: self.slug.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            price: Some(self.price),
            tier: Some(self.tier),
        }
    }

    /// Re-run structural validation. Always empty for a built manifest.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_parts(&self.info(), &self.resources)
    }
}
