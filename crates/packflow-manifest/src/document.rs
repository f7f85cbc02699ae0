//! Canonical manifest document
//!
//! The JSON form exchanged with packaging tools. Loading always goes
//! through [`parse`], which checks the shape, replays every resource through
//! the builder (so duplicates are caught) and validates the result.

use crate::builder::ManifestBuilder;
use crate::error::{ManifestError, Result};
use crate::model::{PackageInfo, ResourceManifest, Resources, Tier};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Shape of the document before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ManifestDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: Option<u64>,
    #[serde(default)]
    tier: Option<Tier>,
    #[serde(default)]
    resources: Resources,
}

impl ManifestDocument {
    fn into_builder(self) -> Result<ManifestBuilder> {
        let mut builder = ManifestBuilder::new();
        builder.set_info(PackageInfo {
            id: self.id,
            name: self.name,
            slug: self.slug,
            version: self.version,
            description: self.description,
            price: self.price,
            tier: self.tier,
        });

        let resources = self.resources;
        for function in resources.compute_functions {
            builder.add_compute_function(function)?;
        }
        for database in resources.databases {
            builder.add_database(database)?;
        }
        for bucket in resources.object_buckets {
            builder.add_object_bucket(bucket)?;
        }
        for record in resources.dns_records {
            builder.add_dns_record(record)?;
        }
        if let Some(hosting) = resources.static_hosting {
            builder.set_static_hosting(hosting)?;
        }
        if let Some(domain) = resources.custom_domain {
            builder.set_custom_domain(domain)?;
        }
        for hook in resources.post_deploy_hooks {
            builder.add_post_deploy_hook(hook)?;
        }

        Ok(builder)
    }
}

/// Parse a JSON manifest document into a validated manifest
pub fn parse(document: &str) -> Result<ResourceManifest> {
    let raw: ManifestDocument = serde_json::from_str(document)?;
    raw.into_builder()?.build()
}

/// Parse a YAML manifest document (same schema as JSON)
pub fn parse_yaml(document: &str) -> Result<ResourceManifest> {
    let raw: ManifestDocument = serde_yaml::from_str(document)?;
    raw.into_builder()?.build()
}

/// Load a manifest file, choosing the format from its extension
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_manifest(path: &Path) -> Result<ResourceManifest> {
    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let manifest = match extension.as_deref() {
        Some("json") => parse(&content)?,
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        _ => return Err(ManifestError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(
        slug = manifest.slug(),
        functions = manifest.compute_functions().len(),
        databases = manifest.databases().len(),
        buckets = manifest.object_buckets().len(),
        "Manifest loaded"
    );
    Ok(manifest)
}

impl ResourceManifest {
    /// Canonical document as a JSON value
    pub fn to_document(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Canonical document as pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        debug!(slug = self.slug(), "Exporting manifest document");
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the canonical document to `path`
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let content = self.export_json()?;
        std::fs::write(path, content).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
