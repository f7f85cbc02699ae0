//! Package metadata

use serde::{Deserialize, Serialize};

/// Listing metadata carried alongside the resources.
///
/// Not used for provisioning, but a manifest cannot be built without it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// Stable package identifier. Generated at build time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    /// URL-safe short name, used for namespaces and default hostnames
    pub slug: String,

    pub version: String,

    pub description: String,

    /// Price in minor currency units (cents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            version: "1.0.0".to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }
}

/// Listing tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Starter,
    Growth,
    Enterprise,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Starter => write!(f, "starter"),
            Tier::Growth => write!(f, "growth"),
            Tier::Enterprise => write!(f, "enterprise"),
        }
    }
}
