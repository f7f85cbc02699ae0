//! Manifest builder
//!
//! Accumulates resources one at a time, rejecting empty or duplicate names
//! as they are added. Nothing here touches the network.

use crate::error::{ManifestError, Result, ValidationErrors, ValidationIssue};
use crate::model::{
    BucketSpec, ComputeFunctionSpec, DatabaseSpec, DnsRecordSpec, DomainSpec, HookSpec,
    PackageInfo, ResourceKind, ResourceManifest, Resources, StaticHostingSpec,
};
use crate::validate::validate_parts;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    info: PackageInfo,
    resources: Resources,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name, slug, price, tier and the other listing metadata
    pub fn set_info(&mut self, info: PackageInfo) -> &mut Self {
        self.info = info;
        self
    }

    pub fn info(&self) -> &PackageInfo {
        &self.info
    }

    pub fn add_compute_function(&mut self, function: ComputeFunctionSpec) -> Result<&mut Self> {
        let names = self.resources.compute_functions.iter().map(|f| f.name.as_str());
        check_name(ResourceKind::ComputeFunction, &function.name, names)?;
        debug!(name = %function.name, "Adding compute function");
        self.resources.compute_functions.push(function);
        Ok(self)
    }

    pub fn add_database(&mut self, database: DatabaseSpec) -> Result<&mut Self> {
        let names = self.resources.databases.iter().map(|d| d.name.as_str());
        check_name(ResourceKind::Database, &database.name, names)?;
        debug!(name = %database.name, "Adding database");
        self.resources.databases.push(database);
        Ok(self)
    }

    pub fn add_object_bucket(&mut self, bucket: BucketSpec) -> Result<&mut Self> {
        let names = self.resources.object_buckets.iter().map(|b| b.name.as_str());
        check_name(ResourceKind::ObjectBucket, &bucket.name, names)?;
        debug!(name = %bucket.name, "Adding object bucket");
        self.resources.object_buckets.push(bucket);
        Ok(self)
    }

    /// DNS records may share a name (e.g. several MX records), so only
    /// emptiness is checked.
    pub fn add_dns_record(&mut self, record: DnsRecordSpec) -> Result<&mut Self> {
        check_name(ResourceKind::DnsRecord, &record.name, std::iter::empty())?;
        self.resources.dns_records.push(record);
        Ok(self)
    }

    pub fn set_static_hosting(&mut self, hosting: StaticHostingSpec) -> Result<&mut Self> {
        check_name(ResourceKind::StaticHosting, &hosting.name, std::iter::empty())?;
        self.resources.static_hosting = Some(hosting);
        Ok(self)
    }

    pub fn set_custom_domain(&mut self, domain: DomainSpec) -> Result<&mut Self> {
        check_name(ResourceKind::CustomDomain, &domain.hostname, std::iter::empty())?;
        self.resources.custom_domain = Some(domain);
        Ok(self)
    }

    pub fn add_post_deploy_hook(&mut self, hook: HookSpec) -> Result<&mut Self> {
        let names = self.resources.post_deploy_hooks.iter().map(|h| h.name.as_str());
        check_name(ResourceKind::PostDeployHook, &hook.name, names)?;
        self.resources.post_deploy_hooks.push(hook);
        Ok(self)
    }

    /// Every structural problem with the current contents
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_parts(&self.info, &self.resources)
    }

    /// Validate and freeze into a [`ResourceManifest`]
    pub fn build(&self) -> Result<ResourceManifest> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(ManifestError::Validation(ValidationErrors(issues)));
        }

        // validate() guarantees both are present
        let (Some(price), Some(tier)) = (self.info.price, self.info.tier) else {
            return Err(ManifestError::MissingPackageInfo("price and tier"));
        };

        let id = self
            .info
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

        Ok(ResourceManifest::from_parts(
            id,
            self.info.clone(),
            price,
            tier,
            self.resources.clone(),
        ))
    }
}

fn check_name<'a>(
    kind: ResourceKind,
    name: &str,
    mut existing: impl Iterator<Item = &'a str>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ManifestError::EmptyName { kind });
    }
    if existing.any(|n| n == name) {
        return Err(ManifestError::DuplicateResource {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}
