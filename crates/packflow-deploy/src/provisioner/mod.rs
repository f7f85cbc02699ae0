//! Resource provisioners
//!
//! Each provisioner creates exactly one kind of resource through the
//! control-plane client. Provisioners never call each other; the
//! orchestrator sequences them and captures their handles.

mod bucket;
mod compute;
mod database;
mod domain;
mod hosting;

pub use bucket::BucketProvisioner;
pub use compute::{ComputeProvisioner, FunctionTarget};
pub use database::DatabaseProvisioner;
pub use domain::DomainProvisioner;
pub use hosting::HostingProvisioner;

use crate::result::ResourceHandle;
use async_trait::async_trait;
use packflow_cloud::{AccountContext, CloudError};
use packflow_manifest::ResourceKind;
use std::future::Future;
use std::time::Duration;

#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Manifest entry this provisioner consumes
    type Spec: Send + Sync;

    const KIND: ResourceKind;

    async fn create(
        &self,
        spec: &Self::Spec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<ResourceHandle>;
}

/// Await a control-plane call, failing with `CloudError::Timeout` once
/// `limit` elapses
pub async fn bounded<T, F>(limit: Duration, operation: &str, call: F) -> packflow_cloud::Result<T>
where
    F: Future<Output = packflow_cloud::Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(CloudError::Timeout(format!(
            "{} did not answer within {:?}",
            operation, limit
        ))),
    }
}
