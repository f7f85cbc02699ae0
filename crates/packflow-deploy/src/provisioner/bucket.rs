use super::{Provisioner, bounded};
use crate::result::ResourceHandle;
use async_trait::async_trait;
use packflow_cloud::{AccountContext, BucketRequest, ControlPlane, CorsRule};
use packflow_manifest::{BucketSpec, ResourceKind};
use std::time::Duration;
use tracing::debug;

pub struct BucketProvisioner<'a> {
    client: &'a dyn ControlPlane,
    timeout: Duration,
}

impl<'a> BucketProvisioner<'a> {
    pub fn new(client: &'a dyn ControlPlane, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Apply the CORS policy when the bucket asks for one
    pub async fn configure(
        &self,
        handle: &ResourceHandle,
        spec: &BucketSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<()> {
        if !spec.cors {
            return Ok(());
        }
        debug!("Enabling CORS on {}", handle.name);
        bounded(
            self.timeout,
            "configure_bucket_cors",
            self.client
                .configure_bucket_cors(ctx, &handle.name, &[CorsRule::permissive()]),
        )
        .await
    }
}

#[async_trait]
impl Provisioner for BucketProvisioner<'_> {
    type Spec = BucketSpec;

    const KIND: ResourceKind = ResourceKind::ObjectBucket;

    async fn create(
        &self,
        spec: &BucketSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<ResourceHandle> {
        let request = BucketRequest {
            name: spec.name.clone(),
            storage_class: spec.storage_class.to_string(),
        };
        let info = bounded(
            self.timeout,
            "create_bucket",
            self.client.create_bucket(ctx, &request),
        )
        .await?;

        // buckets are addressed by name
        Ok(ResourceHandle::new(Self::KIND, info.name.clone(), info.name))
    }
}
