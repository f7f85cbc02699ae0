use super::{Provisioner, bounded};
use crate::result::ResourceHandle;
use async_trait::async_trait;
use packflow_cloud::{AccountContext, Binding, ControlPlane, FunctionUpload};
use packflow_manifest::{ComputeFunctionSpec, DOMAIN_PLACEHOLDER, ResourceKind};
use std::time::Duration;
use tracing::debug;

/// Where uploaded functions land
#[derive(Debug, Clone)]
pub struct FunctionTarget {
    pub namespace: String,
    pub tags: Vec<String>,
    /// Substituted for `${domain}` in routes
    pub hostname: String,
}

pub struct ComputeProvisioner<'a> {
    client: &'a dyn ControlPlane,
    timeout: Duration,
    target: FunctionTarget,
}

impl<'a> ComputeProvisioner<'a> {
    pub fn new(client: &'a dyn ControlPlane, timeout: Duration, target: FunctionTarget) -> Self {
        Self {
            client,
            timeout,
            target,
        }
    }

    fn upload_for(&self, spec: &ComputeFunctionSpec) -> FunctionUpload {
        FunctionUpload {
            name: spec.name.clone(),
            code: spec.code.clone(),
            routes: spec
                .routes
                .iter()
                .map(|r| r.replace(DOMAIN_PLACEHOLDER, &self.target.hostname))
                .collect(),
            env: spec.env.clone(),
            tags: self.target.tags.clone(),
        }
    }

    /// Attach a cron trigger to an uploaded function
    pub async fn schedule(
        &self,
        handle: &ResourceHandle,
        cron: &str,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<()> {
        debug!("Scheduling {} at {}", handle.name, cron);
        bounded(
            self.timeout,
            "set_schedule",
            self.client
                .set_schedule(ctx, &self.target.namespace, &handle.name, cron),
        )
        .await
    }

    /// Push bindings to an uploaded function
    pub async fn configure(
        &self,
        handle: &ResourceHandle,
        bindings: &[Binding],
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<()> {
        debug!("Configuring {} binding(s) on {}", bindings.len(), handle.name);
        bounded(
            self.timeout,
            "configure_bindings",
            self.client
                .configure_bindings(ctx, &self.target.namespace, &handle.name, bindings),
        )
        .await
    }
}

#[async_trait]
impl Provisioner for ComputeProvisioner<'_> {
    type Spec = ComputeFunctionSpec;

    const KIND: ResourceKind = ResourceKind::ComputeFunction;

    async fn create(
        &self,
        spec: &ComputeFunctionSpec,
        ctx: &AccountContext,
    ) -> packflow_cloud::Result<ResourceHandle> {
        let upload = self.upload_for(spec);
        debug!(
            "Uploading {} ({} bytes, {} route(s))",
            upload.name,
            upload.code.len(),
            upload.routes.len()
        );

        let info = bounded(
            self.timeout,
            "upload_function",
            self.client
                .upload_function(ctx, &self.target.namespace, &upload),
        )
        .await?;

        Ok(ResourceHandle::new(Self::KIND, info.name, info.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packflow_cloud::Credentials;
    use packflow_cloud::mock::{MockControlPlane, Operation};

    fn target() -> FunctionTarget {
        FunctionTarget {
            namespace: "shop-ns".to_string(),
            tags: vec!["packflow:name=Shop".to_string()],
            hostname: "shop.packflow.app".to_string(),
        }
    }

    #[test]
    fn test_routes_resolve_domain() {
        let mock = MockControlPlane::new();
        let provisioner = ComputeProvisioner::new(&mock, Duration::from_secs(1), target());
        let spec = ComputeFunctionSpec::new("api", "export default {}")
            .with_route("api.${domain}/*");

        let upload = provisioner.upload_for(&spec);
        assert_eq!(upload.routes, vec!["api.shop.packflow.app/*"]);
        assert_eq!(upload.tags, vec!["packflow:name=Shop"]);
    }

    #[tokio::test]
    async fn test_create_and_configure() {
        let mock = MockControlPlane::new();
        let ctx = AccountContext::new(Credentials::new("token"), "acc-1");
        let provisioner = ComputeProvisioner::new(&mock, Duration::from_secs(1), target());

        let handle = provisioner
            .create(&ComputeFunctionSpec::new("api", "export default {}"), &ctx)
            .await
            .unwrap();
        assert_eq!(handle.id, "fn-api");
        assert_eq!(handle.kind, ResourceKind::ComputeFunction);

        let bindings = vec![Binding::Bucket {
            name: "UPLOADS".to_string(),
            bucket_name: "uploads".to_string(),
        }];
        provisioner.configure(&handle, &bindings, &ctx).await.unwrap();
        assert_eq!(mock.bindings_for("api"), Some(bindings));
        assert_eq!(mock.call_count(Operation::ConfigureBindings), 1);
    }

    #[tokio::test]
    async fn test_schedule_after_upload() {
        let mock = MockControlPlane::new();
        let ctx = AccountContext::new(Credentials::new("token"), "acc-1");
        let provisioner = ComputeProvisioner::new(&mock, Duration::from_secs(1), target());
        let spec =
            ComputeFunctionSpec::new("worker", "export default {}").with_schedule("*/5 * * * *");

        let handle = provisioner.create(&spec, &ctx).await.unwrap();
        assert_eq!(mock.call_count(Operation::SetSchedule), 0);

        provisioner.schedule(&handle, "*/5 * * * *", &ctx).await.unwrap();
        assert_eq!(mock.schedule_for("worker").as_deref(), Some("*/5 * * * *"));
    }
}
