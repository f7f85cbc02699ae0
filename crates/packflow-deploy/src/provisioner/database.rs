use super::{Provisioner, bounded};
use crate::result::ResourceHandle;
use async_trait::async_trait;
use packflow_cloud::{AccountContext, ControlPlane, DatabaseRequest};
use packflow_manifest::{DatabaseSpec, ResourceKind};
use std::time::Duration;
use tracing::debug;

pub struct DatabaseProvisioner<'a> {
    client: &'a dyn ControlPlane,
    timeout: Duration,
}

impl<'a> DatabaseProvisioner<'a> {
    pub fn new(client: &'a dyn ControlPlane, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Run the schema, then the seed, against a created database
    pub async fn configure(
        &self,
        handle: &ResourceHandle,
        spec: &DatabaseSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<()> {
        for (label, sql) in [("schema", &spec.schema), ("seed", &spec.seed)] {
            let Some(sql) = sql.as_deref().filter(|s| !s.trim().is_empty()) else {
                continue;
            };
            let outcome = bounded(
                self.timeout,
                "execute_sql",
                self.client.execute_sql(ctx, &handle.id, sql),
            )
            .await?;
            debug!(
                "Applied {} to {}: {} change(s) in {:.1}ms",
                label, handle.name, outcome.changes, outcome.duration_ms
            );
        }
        Ok(())
    }
}

#[async_trait]
impl Provisioner for DatabaseProvisioner<'_> {
    type Spec = DatabaseSpec;

    const KIND: ResourceKind = ResourceKind::Database;

    async fn create(
        &self,
        spec: &DatabaseSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<ResourceHandle> {
        let request = DatabaseRequest {
            name: spec.name.clone(),
            location: spec.location.clone(),
        };
        let info = bounded(
            self.timeout,
            "create_database",
            self.client.create_database(ctx, &request),
        )
        .await?;

        Ok(ResourceHandle::new(Self::KIND, info.name, info.id))
    }
}
