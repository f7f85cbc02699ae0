//! Deployment orchestrator
//!
//! Drives one manifest into one target account:
//!
//! 1. verify the account
//! 2. create the namespace
//! 3. upload compute functions, then attach cron schedules
//! 4. create databases, then run schema and seed
//! 5. create buckets, then apply CORS
//! 6. resolve the hostname (custom hostname + DNS records when a domain is set)
//! 7. create the static hosting project
//! 8. bind every database and bucket to every function
//! 9. run post-deploy hooks
//! 10. assemble the result
//!
//! Any failure in steps 1-8 ends the run. Resources created before the
//! failure stay in the account and are reported on the error.

use crate::bindings::plan_bindings;
use crate::error::{DeployError, Result};
use crate::hooks::{DeploymentSummary, HookRunner, HttpHookRunner};
use crate::provisioner::{
    BucketProvisioner, ComputeProvisioner, DatabaseProvisioner, DomainProvisioner, FunctionTarget,
    HostingProvisioner, Provisioner, bounded,
};
use crate::result::{
    DeploymentResult, Endpoints, HookWarning, NamespaceHandle, PartialDeployment, ResourceHandle,
};
use chrono::{DateTime, Utc};
use packflow_cloud::{AccountContext, CloudError, ControlPlane, Credentials, NamespaceRequest};
use packflow_manifest::{ResourceKind, ResourceManifest, ValidationErrors};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub const DEFAULT_PLATFORM_DOMAIN: &str = "packflow.app";
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Parent domain for deployments without a custom domain
    pub platform_domain: String,
    /// Upper bound on each control-plane call
    pub call_timeout: Duration,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            platform_domain: DEFAULT_PLATFORM_DOMAIN.to_string(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl DeployOptions {
    pub fn with_platform_domain(mut self, domain: impl Into<String>) -> Self {
        self.platform_domain = domain.into();
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

/// `{slug}-{yyyymmddHHMMSS}-{8 hex}`
///
/// The suffix comes from the random tail of a UUIDv7, so two deployments
/// started in the same second still get distinct names.
pub fn namespace_name(slug: &str, at: DateTime<Utc>) -> String {
    let uuid = Uuid::now_v7().simple().to_string();
    let suffix = &uuid[uuid.len() - 8..];
    format!("{}-{}-{}", slug, at.format("%Y%m%d%H%M%S"), suffix)
}

/// Tags attached to the namespace and every uploaded function
pub fn namespace_tags(manifest: &ResourceManifest) -> Vec<String> {
    vec![
        format!("packflow:name={}", manifest.name()),
        format!("packflow:version={}", manifest.version()),
    ]
}

/// Hostname a deployment answers on
pub fn resolve_hostname(manifest: &ResourceManifest, platform_domain: &str) -> Endpoints {
    match manifest.custom_domain() {
        Some(domain) => Endpoints::for_hostname(domain.hostname.clone(), true),
        None => Endpoints::for_hostname(format!("{}.{}", manifest.slug(), platform_domain), false),
    }
}

/// Provisions manifests into target accounts
///
/// Holds no per-run state; one orchestrator may serve concurrent deployments.
pub struct Orchestrator {
    client: Arc<dyn ControlPlane>,
    hooks: Arc<dyn HookRunner>,
    /// Set once a caller supplies its own runner
    custom_hooks: bool,
    options: DeployOptions,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn ControlPlane>) -> Self {
        Self {
            client,
            hooks: Arc::new(HttpHookRunner::new().with_timeout(DEFAULT_CALL_TIMEOUT)),
            custom_hooks: false,
            options: DeployOptions::default(),
        }
    }

    pub fn with_hook_runner(mut self, hooks: Arc<dyn HookRunner>) -> Self {
        self.hooks = hooks;
        self.custom_hooks = true;
        self
    }

    /// The built-in HTTP hook runner follows `call_timeout`
    pub fn with_options(mut self, options: DeployOptions) -> Self {
        if !self.custom_hooks {
            self.hooks = Arc::new(HttpHookRunner::new().with_timeout(options.call_timeout));
        }
        self.options = options;
        self
    }

    pub fn options(&self) -> &DeployOptions {
        &self.options
    }

    #[instrument(skip(self, manifest, credentials), fields(package = %manifest.slug(), client = %self.client.name()))]
    pub async fn deploy(
        &self,
        manifest: &ResourceManifest,
        credentials: &Credentials,
    ) -> Result<DeploymentResult> {
        let issues = manifest.validate();
        if !issues.is_empty() {
            return Err(DeployError::Validation(ValidationErrors(issues)));
        }

        let timeout = self.options.call_timeout;
        let client = self.client.as_ref();

        // 1. account
        let account_id = self.verify_account(credentials).await?;
        info!("Deploying {} into account {}", manifest.slug(), account_id);
        let ctx = AccountContext::new(credentials.clone(), account_id.clone());
        let mut partial = PartialDeployment {
            account_id: Some(account_id.clone()),
            ..Default::default()
        };

        // 2. namespace
        let tags = namespace_tags(manifest);
        let request = NamespaceRequest {
            name: namespace_name(manifest.slug(), Utc::now()),
            tags: tags.clone(),
        };
        let namespace = bounded(
            timeout,
            "create_namespace",
            client.create_namespace(&ctx, &request),
        )
        .await
        .map(|ns| NamespaceHandle {
            name: ns.name,
            id: ns.id,
        })
        .map_err(|source| DeployError::Namespace {
            name: request.name.clone(),
            source,
        })?;
        info!("Namespace {} ready", namespace.name);
        partial.namespace = Some(namespace.clone());

        // hostname is fixed up front so routes can reference it
        let endpoints = resolve_hostname(manifest, &self.options.platform_domain);

        // 3. compute functions
        let compute = ComputeProvisioner::new(
            client,
            timeout,
            FunctionTarget {
                namespace: namespace.name.clone(),
                tags,
                hostname: endpoints.hostname.clone(),
            },
        );
        let mut functions = Vec::with_capacity(manifest.compute_functions().len());
        for spec in manifest.compute_functions() {
            let handle = create(&compute, spec, &spec.name, &ctx, &mut partial).await?;
            if let Some(cron) = &spec.schedule {
                compute
                    .schedule(&handle, cron, &ctx)
                    .await
                    .map_err(|source| creation_failed(&handle, source, &partial))?;
            }
            functions.push(handle);
        }
        info!("Uploaded {} compute function(s)", functions.len());

        // 4. databases
        let database = DatabaseProvisioner::new(client, timeout);
        let mut databases = Vec::with_capacity(manifest.databases().len());
        for spec in manifest.databases() {
            let handle = create(&database, spec, &spec.name, &ctx, &mut partial).await?;
            database
                .configure(&handle, spec, &ctx)
                .await
                .map_err(|source| creation_failed(&handle, source, &partial))?;
            databases.push(handle);
        }
        info!("Created {} database(s)", databases.len());

        // 5. buckets
        let bucket = BucketProvisioner::new(client, timeout);
        let mut buckets = Vec::with_capacity(manifest.object_buckets().len());
        for spec in manifest.object_buckets() {
            let handle = create(&bucket, spec, &spec.name, &ctx, &mut partial).await?;
            bucket
                .configure(&handle, spec, &ctx)
                .await
                .map_err(|source| creation_failed(&handle, source, &partial))?;
            buckets.push(handle);
        }
        info!("Created {} bucket(s)", buckets.len());

        // 6. domain and DNS
        match manifest.custom_domain() {
            Some(domain) => {
                let provisioner = DomainProvisioner::new(client, timeout);
                create(&provisioner, domain, &domain.hostname, &ctx, &mut partial).await?;
                for record in manifest.dns_records() {
                    let handle = provisioner
                        .create_record(domain, record, &ctx)
                        .await
                        .map_err(|source| DeployError::ResourceCreation {
                            kind: ResourceKind::DnsRecord,
                            name: record.resolve(&domain.hostname).name,
                            source,
                            partial: Box::new(partial.clone()),
                        })?;
                    partial.record(&handle);
                }
                info!("Custom domain {} registered", domain.hostname);
            }
            None => {
                if !manifest.dns_records().is_empty() {
                    warn!(
                        "Ignoring {} DNS record(s): no custom domain",
                        manifest.dns_records().len()
                    );
                }
                info!("Using platform hostname {}", endpoints.hostname);
            }
        }

        // 7. static hosting
        if let Some(spec) = manifest.static_hosting() {
            let hosting = HostingProvisioner::new(client, timeout);
            create(&hosting, spec, &spec.name, &ctx, &mut partial).await?;
            info!("Static hosting project {} created", spec.name);
        }

        // 8. bindings
        let bindings = plan_bindings(&databases, &buckets);
        if !bindings.is_empty() {
            let names: Vec<String> = bindings.iter().map(|b| b.name().to_string()).collect();
            for function in &functions {
                compute
                    .configure(function, &bindings, &ctx)
                    .await
                    .map_err(|source| DeployError::BindingConfiguration {
                        function: function.name.clone(),
                        source,
                        partial: Box::new(partial.clone()),
                    })?;
                partial.bindings.insert(function.name.clone(), names.clone());
            }
            info!(
                "Bound {} resource(s) to {} function(s)",
                bindings.len(),
                functions.len()
            );
        }

        // 9. hooks
        let summary = DeploymentSummary {
            event: DeploymentSummary::EVENT,
            package: manifest.name().to_string(),
            slug: manifest.slug().to_string(),
            version: manifest.version().to_string(),
            account_id: account_id.clone(),
            namespace: namespace.name.clone(),
            hostname: endpoints.hostname.clone(),
            dashboard_url: endpoints.dashboard_url.clone(),
            api_endpoint: endpoints.api_endpoint.clone(),
            functions: names_of(&functions),
            databases: names_of(&databases),
            buckets: names_of(&buckets),
        };
        let mut warnings = Vec::new();
        for hook in manifest.post_deploy_hooks() {
            debug!("Running {} hook {}", hook.kind, hook.name);
            if let Err(e) = self.hooks.run(hook, &summary).await {
                warn!("Hook {} failed: {}", hook.name, e);
                warnings.push(HookWarning {
                    hook: hook.name.clone(),
                    message: e.to_string(),
                });
            }
        }

        // 10. result
        let result = partial.finish(account_id, namespace, endpoints, warnings);
        info!(
            "Deployment of {} complete at {}",
            manifest.slug(),
            result.dashboard_url
        );
        Ok(result)
    }

    async fn verify_account(&self, credentials: &Credentials) -> Result<String> {
        let accounts = bounded(
            self.options.call_timeout,
            "list_accounts",
            self.client.list_accounts(credentials),
        )
        .await
        .map_err(|e| DeployError::AccountVerification(e.to_string()))?;

        debug!("Credentials reach {} account(s)", accounts.len());

        match &credentials.account_id {
            Some(wanted) => accounts
                .iter()
                .find(|a| &a.id == wanted)
                .map(|a| a.id.clone())
                .ok_or_else(|| {
                    DeployError::AccountVerification(format!(
                        "account {} is not accessible with these credentials",
                        wanted
                    ))
                }),
            None => accounts.first().map(|a| a.id.clone()).ok_or_else(|| {
                DeployError::AccountVerification(
                    "no accounts are accessible with these credentials".to_string(),
                )
            }),
        }
    }
}

/// Create through a provisioner and record the handle, or fail the step
async fn create<P: Provisioner>(
    provisioner: &P,
    spec: &P::Spec,
    name: &str,
    ctx: &AccountContext,
    partial: &mut PartialDeployment,
) -> Result<ResourceHandle> {
    match provisioner.create(spec, ctx).await {
        Ok(handle) => {
            debug!("Created {} {} ({})", P::KIND, handle.name, handle.id);
            partial.record(&handle);
            Ok(handle)
        }
        Err(source) => Err(DeployError::ResourceCreation {
            kind: P::KIND,
            name: name.to_string(),
            source,
            partial: Box::new(partial.clone()),
        }),
    }
}

/// A resource exists but configuring it failed
fn creation_failed(
    handle: &ResourceHandle,
    source: CloudError,
    partial: &PartialDeployment,
) -> DeployError {
    DeployError::ResourceCreation {
        kind: handle.kind,
        name: handle.name.clone(),
        source,
        partial: Box::new(partial.clone()),
    }
}

fn names_of(handles: &[ResourceHandle]) -> Vec<String> {
    handles.iter().map(|h| h.name.clone()).collect()
}
