//! PackFlow Control-Plane Client
//!
//! This crate defines the capability the provisioning orchestrator depends
//! on: a thin, authenticated client over a target cloud's management API.
//! Concrete transports live in provider crates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 packflow-deploy                  │
//! │        (orchestrator + provisioners)             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                packflow-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │      trait ControlPlane { ... }           │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Typed records│  │ Mock (tests) │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │  cloudflare   │
//! │   provider    │
//! └───────────────┘
//! ```

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod provider;
pub mod types;

// Re-exports
pub use error::{CloudError, Result};
pub use provider::ControlPlane;
pub use types::{
    Account, AccountContext, Binding, BucketInfo, BucketRequest, CorsRule, Credentials,
    CustomHostnameInfo, DatabaseInfo, DatabaseRequest, DnsRecordInfo, DnsRecordRequest,
    FunctionInfo, FunctionUpload, HostingProjectInfo, HostingProjectRequest, NamespaceInfo,
    NamespaceRequest, QueryOutcome,
};
