//! PackFlow Resource Manifest
//!
//! Declarative description of everything a business package provisions:
//! compute functions, databases, object buckets, DNS records, a custom
//! domain, a static hosting project and post-deploy hooks.
//!
//! # Building
//!
//! ```
//! use packflow_manifest::{ComputeFunctionSpec, DatabaseSpec, ManifestBuilder, PackageInfo, Tier};
//!
//! let mut builder = ManifestBuilder::new();
//! builder.set_info(
//!     PackageInfo::new("Coffee Shop", "coffee-shop")
//!         .with_description("Online ordering")
//!         .with_price(4900)
//!         .with_tier(Tier::Starter),
//! );
//! builder
//!     .add_compute_function(ComputeFunctionSpec::new("api", "export default {}"))?
//!     .add_database(DatabaseSpec::new("orders-db"))?;
//!
//! let manifest = builder.build()?;
//! assert_eq!(manifest.slug(), "coffee-shop");
//! # Ok::<(), packflow_manifest::ManifestError>(())
//! ```
//!
//! # Loading
//!
//! Documents produced by packaging tools are loaded with [`parse`] or
//! [`load_manifest`]; both validate before returning.

pub mod builder;
pub mod document;
pub mod error;
pub mod model;
mod validate;

pub use builder::ManifestBuilder;
pub use document::{load_manifest, parse, parse_yaml};
pub use error::{ManifestError, Result, ValidationErrors, ValidationIssue};
pub use model::*;
pub use validate::{binding_name, is_valid_slug};
