mod common;

use common::{
    RecordingHooks, credentials, custom_domain_manifest, manifest_with_hooks, orchestrator,
};
use packflow_cloud::mock::{MockControlPlane, Operation};
use packflow_deploy::{DeployError, DeployOptions, DeploymentSummary, HookWarning, Orchestrator};
use packflow_manifest::{HookKind, HookSpec, ResourceKind};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_custom_domain_deploy() {
    let mock = Arc::new(MockControlPlane::new());
    let orch = orchestrator(mock.clone(), Arc::new(RecordingHooks::default()));

    let result = orch
        .deploy(&custom_domain_manifest(), &credentials())
        .await
        .unwrap();

    assert_eq!(result.hostname, "coffee.example.com");
    assert_eq!(result.custom_domain.as_deref(), Some("coffee.example.com"));
    assert_eq!(result.api_endpoint, "api.coffee.example.com");
    assert_eq!(
        mock.targets(Operation::RegisterCustomHostname),
        vec!["coffee.example.com"]
    );
    assert_eq!(
        mock.targets(Operation::CreateDnsRecord),
        vec!["www.coffee.example.com", "_verify.coffee.example.com"]
    );
    assert_eq!(result.dns_records.len(), 2);
    let hostname = result.custom_hostname.as_ref().unwrap();
    assert_eq!(hostname.name, "coffee.example.com");
    assert_eq!(hostname.id, "ch-coffee.example.com");
}

#[tokio::test]
async fn test_dns_failure_names_resolved_record() {
    let mock = Arc::new(
        MockControlPlane::new().fail_on(Operation::CreateDnsRecord, "_verify.coffee.example.com"),
    );
    let orch = orchestrator(mock, Arc::new(RecordingHooks::default()));

    let err = orch
        .deploy(&custom_domain_manifest(), &credentials())
        .await
        .unwrap_err();

    match err {
        DeployError::ResourceCreation {
            kind,
            name,
            partial,
            ..
        } => {
            assert_eq!(kind, ResourceKind::DnsRecord);
            assert_eq!(name, "_verify.coffee.example.com");
            assert_eq!(partial.dns_records.len(), 1);
            assert!(partial.custom_hostname.is_some());
        }
        other => panic!("Expected ResourceCreation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_hooks_run_in_order_with_summary() {
    let hooks = Arc::new(RecordingHooks::default());
    let orch = orchestrator(Arc::new(MockControlPlane::new()), hooks.clone());

    let result = orch
        .deploy(&manifest_with_hooks(), &credentials())
        .await
        .unwrap();

    assert_eq!(hooks.hook_names(), vec!["notify", "welcome"]);
    let runs = hooks.runs.lock().unwrap();
    let summary: &DeploymentSummary = &runs[0].1;
    assert_eq!(summary.event, DeploymentSummary::EVENT);
    assert_eq!(summary.namespace, result.namespace.name);
    assert_eq!(summary.dashboard_url, result.dashboard_url);
    assert_eq!(summary.functions, vec!["api", "worker"]);
}

#[tokio::test]
async fn test_hook_failure_is_a_warning() {
    let hooks = Arc::new(RecordingHooks::failing(&["notify"]));
    let orch = orchestrator(Arc::new(MockControlPlane::new()), hooks.clone());

    let result = orch
        .deploy(&manifest_with_hooks(), &credentials())
        .await
        .unwrap();

    // the second hook still ran
    assert_eq!(hooks.hook_names(), vec!["notify", "welcome"]);
    assert!(result.has_warnings());
    assert_eq!(
        result.warnings,
        vec![HookWarning {
            hook: "notify".to_string(),
            message: "Invalid hook configuration: notify refused".to_string(),
        }]
    );
}

/// The built-in HTTP runner gives up on a hook after `call_timeout`
#[tokio::test]
async fn test_slow_webhook_bounded_by_call_timeout() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/notify")
        .with_status(200)
        .with_body_from_request(|_| {
            std::thread::sleep(Duration::from_millis(1500));
            b"ok".to_vec()
        })
        .create_async()
        .await;

    let mut builder = common::shop_builder();
    builder
        .add_post_deploy_hook(HookSpec::new(
            "notify",
            HookKind::Webhook,
            serde_json::json!({ "url": format!("{}/notify", server.url()) }),
        ))
        .unwrap();
    let manifest = builder.build().unwrap();

    let orch = Orchestrator::new(Arc::new(MockControlPlane::new()))
        .with_options(DeployOptions::default().with_call_timeout(Duration::from_millis(200)));
    let started = Instant::now();
    let result = orch.deploy(&manifest, &credentials()).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(1400));
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].hook, "notify");
}

#[tokio::test]
async fn test_concurrent_deploys_share_nothing() {
    let mock = Arc::new(MockControlPlane::new());
    let orch = Arc::new(
        Orchestrator::new(mock.clone()).with_hook_runner(Arc::new(RecordingHooks::default())),
    );
    let manifest = Arc::new(common::shop_manifest());

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let orch = orch.clone();
            let manifest = manifest.clone();
            tokio::spawn(async move { orch.deploy(&manifest, &credentials()).await })
        })
        .collect();

    let mut namespaces = Vec::new();
    for task in tasks {
        let result = task.await.unwrap().unwrap();
        assert_eq!(result.databases.len(), 3);
        namespaces.push(result.namespace.name);
    }
    namespaces.sort();
    namespaces.dedup();
    assert_eq!(namespaces.len(), 4);
    assert_eq!(mock.call_count(Operation::CreateNamespace), 4);
}
