use async_trait::async_trait;
use packflow_cloud::Credentials;
use packflow_cloud::mock::MockControlPlane;
use packflow_deploy::{DeployOptions, DeploymentSummary, HookError, HookRunner, Orchestrator};
use packflow_manifest::{
    BucketSpec, ComputeFunctionSpec, DatabaseSpec, DnsRecordSpec, DnsRecordType, DomainSpec,
    HookKind, HookSpec, ManifestBuilder, PackageInfo, ResourceManifest, StaticHostingSpec, Tier,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records hook runs and fails the ones it is told to
#[derive(Default)]
pub struct RecordingHooks {
    pub failing: Vec<String>,
    pub runs: Mutex<Vec<(String, DeploymentSummary)>>,
}

impl RecordingHooks {
    #[allow(dead_code)]
    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    #[allow(dead_code)]
    pub fn hook_names(&self) -> Vec<String> {
        self.runs
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl HookRunner for RecordingHooks {
    async fn run(&self, hook: &HookSpec, summary: &DeploymentSummary) -> Result<(), HookError> {
        self.runs
            .lock()
            .unwrap()
            .push((hook.name.clone(), summary.clone()));
        if self.failing.contains(&hook.name) {
            return Err(HookError::InvalidConfig(format!("{} refused", hook.name)));
        }
        Ok(())
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("test-token")
}

/// Package info plus the `api` and `worker` functions
#[allow(dead_code)]
pub fn shop_builder() -> ManifestBuilder {
    let mut builder = ManifestBuilder::new();
    builder.set_info(
        PackageInfo::new("Coffee Shop", "coffee-shop")
            .with_description("Online ordering for a neighbourhood cafe")
            .with_price(4900)
            .with_tier(Tier::Starter),
    );
    builder
        .add_compute_function(
            ComputeFunctionSpec::new("api", "export default { fetch() {} }")
                .with_route("api.${domain}/*"),
        )
        .unwrap()
        .add_compute_function(
            ComputeFunctionSpec::new("worker", "export default { scheduled() {} }")
                .with_schedule("0 * * * *"),
        )
        .unwrap();
    builder
}

/// Two functions, three databases and two buckets, no custom domain
pub fn shop_manifest() -> ResourceManifest {
    let mut builder = shop_builder();
    builder
        .add_database(
            DatabaseSpec::new("orders-db")
                .with_schema("CREATE TABLE orders (id INTEGER PRIMARY KEY);")
                .with_seed("INSERT INTO orders (id) VALUES (1);"),
        )
        .unwrap()
        .add_database(DatabaseSpec::new("customers-db"))
        .unwrap()
        .add_database(DatabaseSpec::new("menu-db"))
        .unwrap()
        .add_object_bucket(BucketSpec::new("uploads").with_cors())
        .unwrap()
        .add_object_bucket(BucketSpec::new("receipts"))
        .unwrap()
        .set_static_hosting(StaticHostingSpec::new("coffee-shop-site"))
        .unwrap();
    builder.build().unwrap()
}

/// Shop manifest plus a custom domain with DNS records
#[allow(dead_code)]
pub fn custom_domain_manifest() -> ResourceManifest {
    let mut builder = shop_builder();
    builder
        .add_database(DatabaseSpec::new("orders-db"))
        .unwrap()
        .set_custom_domain(DomainSpec::new("coffee.example.com", "zone-1"))
        .unwrap()
        .add_dns_record(DnsRecordSpec::new(
            DnsRecordType::Cname,
            "www.${domain}",
            "${domain}",
        ))
        .unwrap()
        .add_dns_record(DnsRecordSpec::new(
            DnsRecordType::Txt,
            "_verify.${domain}",
            "packflow-verification",
        ))
        .unwrap();
    builder.build().unwrap()
}

/// Shop manifest with two hooks, `notify` and `welcome`
#[allow(dead_code)]
pub fn manifest_with_hooks() -> ResourceManifest {
    let mut builder = shop_builder();
    builder
        .add_post_deploy_hook(HookSpec::new(
            "notify",
            HookKind::Webhook,
            serde_json::json!({ "url": "https://hooks.example.com/notify" }),
        ))
        .unwrap()
        .add_post_deploy_hook(HookSpec::new(
            "welcome",
            HookKind::Email,
            serde_json::json!({ "endpoint": "https://mail.example.com", "to": "owner@example.com" }),
        ))
        .unwrap();
    builder.build().unwrap()
}

pub fn orchestrator(mock: Arc<MockControlPlane>, hooks: Arc<RecordingHooks>) -> Orchestrator {
    Orchestrator::new(mock)
        .with_hook_runner(hooks)
        .with_options(DeployOptions::default().with_call_timeout(Duration::from_secs(2)))
}
