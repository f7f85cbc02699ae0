use super::{Provisioner, bounded};
use crate::result::ResourceHandle;
use async_trait::async_trait;
use packflow_cloud::{AccountContext, ControlPlane, DnsRecordRequest};
use packflow_manifest::{DnsRecordSpec, DomainSpec, ResourceKind};
use std::time::Duration;
use tracing::debug;

/// Custom hostname registration plus the zone's DNS records
pub struct DomainProvisioner<'a> {
    client: &'a dyn ControlPlane,
    timeout: Duration,
}

impl<'a> DomainProvisioner<'a> {
    pub fn new(client: &'a dyn ControlPlane, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Create one DNS record with `${domain}` resolved to the custom hostname
    pub async fn create_record(
        &self,
        domain: &DomainSpec,
        record: &DnsRecordSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<ResourceHandle> {
        let resolved = record.resolve(&domain.hostname);
        let request = DnsRecordRequest {
            record_type: resolved.record_type.to_string(),
            name: resolved.name,
            content: resolved.content,
            ttl: resolved.ttl,
            proxied: resolved.proxied,
        };
        debug!(
            "DNS {} {} -> {}",
            request.record_type, request.name, request.content
        );

        let info = bounded(
            self.timeout,
            "create_dns_record",
            self.client.create_dns_record(ctx, &domain.zone_id, &request),
        )
        .await?;

        Ok(ResourceHandle::new(ResourceKind::DnsRecord, info.name, info.id))
    }
}

#[async_trait]
impl Provisioner for DomainProvisioner<'_> {
    type Spec = DomainSpec;

    const KIND: ResourceKind = ResourceKind::CustomDomain;

    async fn create(
        &self,
        spec: &DomainSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<ResourceHandle> {
        let info = bounded(
            self.timeout,
            "register_custom_hostname",
            self.client
                .register_custom_hostname(ctx, &spec.zone_id, &spec.hostname),
        )
        .await?;
        debug!("Custom hostname {} is {}", info.hostname, info.status);

        Ok(ResourceHandle::new(Self::KIND, info.hostname, info.id))
    }
}
