use super::{Provisioner, bounded};
use crate::result::ResourceHandle;
use async_trait::async_trait;
use packflow_cloud::{AccountContext, ControlPlane, HostingProjectRequest};
use packflow_manifest::{ResourceKind, StaticHostingSpec};
use std::time::Duration;
use tracing::debug;

pub struct HostingProvisioner<'a> {
    client: &'a dyn ControlPlane,
    timeout: Duration,
}

impl<'a> HostingProvisioner<'a> {
    pub fn new(client: &'a dyn ControlPlane, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Provisioner for HostingProvisioner<'_> {
    type Spec = StaticHostingSpec;

    const KIND: ResourceKind = ResourceKind::StaticHosting;

    async fn create(
        &self,
        spec: &StaticHostingSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<ResourceHandle> {
        let request = HostingProjectRequest {
            name: spec.name.clone(),
            production_branch: spec.build.production_branch.clone(),
            build_command: spec.build.command.clone(),
            output_dir: spec.build.output_dir.clone(),
            root_dir: spec.build.root_dir.clone(),
        };
        let info = bounded(
            self.timeout,
            "create_hosting_project",
            self.client.create_hosting_project(ctx, &request),
        )
        .await?;
        if let Some(subdomain) = &info.subdomain {
            debug!("Hosting project {} serves at {}", info.name, subdomain);
        }

        Ok(ResourceHandle::new(Self::KIND, info.name, info.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packflow_cloud::Credentials;
    use packflow_cloud::mock::MockControlPlane;

    #[tokio::test]
    async fn test_create_project() {
        let mock = MockControlPlane::new();
        let ctx = AccountContext::new(Credentials::new("token"), "acc-1");
        let provisioner = HostingProvisioner::new(&mock, Duration::from_secs(1));

        let handle = provisioner
            .create(&StaticHostingSpec::new("shop-site"), &ctx)
            .await
            .unwrap();
        assert_eq!(handle.id, "pages-shop-site");
        assert_eq!(handle.kind, ResourceKind::StaticHosting);
    }
}
