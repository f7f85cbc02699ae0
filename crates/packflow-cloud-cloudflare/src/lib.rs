//! Cloudflare control-plane client for PackFlow
//!
//! Implements [`packflow_cloud::ControlPlane`] directly against the
//! Cloudflare API v4 with `reqwest`. No CLI tooling is required on the
//! deploying machine; every call authenticates with the buyer's API token.
//!
//! # Example
//!
//! ```ignore
//! use packflow_cloud::{ControlPlane, Credentials};
//! use packflow_cloud_cloudflare::CloudflareClient;
//!
//! let client = CloudflareClient::new();
//! let accounts = client
//!     .list_accounts(&Credentials::new(std::env::var("CLOUDFLARE_API_TOKEN")?))
//!     .await?;
//! ```

mod api;
pub mod client;
pub mod error;

pub use client::{CLOUDFLARE_API_BASE, CloudflareClient};
pub use error::{CloudflareError, Result};
