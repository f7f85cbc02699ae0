//! PackFlow provisioning orchestrator
//!
//! Turns a validated [`ResourceManifest`](packflow_manifest::ResourceManifest)
//! into live resources in a buyer's account through a
//! [`ControlPlane`](packflow_cloud::ControlPlane) client.
//!
//! # Example
//!
//! ```ignore
//! use packflow_cloud::Credentials;
//! use packflow_cloud_cloudflare::CloudflareClient;
//! use packflow_deploy::Orchestrator;
//! use std::sync::Arc;
//!
//! let orchestrator = Orchestrator::new(Arc::new(CloudflareClient::new()));
//! let result = orchestrator
//!     .deploy(&manifest, &Credentials::new(token))
//!     .await?;
//! println!("live at {}", result.dashboard_url);
//! ```
//!
//! There is no rollback: when a step fails, the error carries a
//! [`PartialDeployment`] listing what already exists in the account.

pub mod bindings;
pub mod error;
pub mod hooks;
pub mod orchestrator;
pub mod provisioner;
pub mod result;

// Re-exports
pub use bindings::binding_name;
pub use error::{DeployError, Result};
pub use hooks::{DeploymentSummary, HookError, HookRunner, HttpHookRunner, NoopHookRunner};
pub use orchestrator::{
    DEFAULT_CALL_TIMEOUT, DEFAULT_PLATFORM_DOMAIN, DeployOptions, Orchestrator, namespace_name,
};
pub use provisioner::Provisioner;
pub use result::{
    CreatedResource, DeploymentResult, Endpoints, HookWarning, NamespaceHandle, PartialDeployment,
    ResourceHandle,
};
