//! DNS, custom domain and static hosting models

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the resolved hostname at deploy time
pub const DOMAIN_PLACEHOLDER: &str = "${domain}";

/// A DNS record created in the custom domain's zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordSpec {
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,

    /// Record name, may contain `${domain}`
    pub name: String,

    /// Record content, may contain `${domain}`
    pub content: String,

    /// TTL in seconds, 1 means automatic
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    #[serde(default)]
    pub proxied: bool,
}

fn default_ttl() -> u32 {
    1
}

impl DnsRecordSpec {
    pub fn new(
        record_type: DnsRecordType,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            content: content.into(),
            ttl: default_ttl(),
            proxied: true,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn unproxied(mut self) -> Self {
        self.proxied = false;
        self
    }

    /// Returns a copy with every `${domain}` replaced by `hostname`
    pub fn resolve(&self, hostname: &str) -> Self {
        Self {
            name: self.name.replace(DOMAIN_PLACEHOLDER, hostname),
            content: self.content.replace(DOMAIN_PLACEHOLDER, hostname),
            ..self.clone()
        }
    }
}

/// DNS record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DnsRecordType::A => write!(f, "A"),
            DnsRecordType::Aaaa => write!(f, "AAAA"),
            DnsRecordType::Cname => write!(f, "CNAME"),
            DnsRecordType::Txt => write!(f, "TXT"),
            DnsRecordType::Mx => write!(f, "MX"),
        }
    }
}

/// Buyer-owned hostname served by the package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSpec {
    pub hostname: String,
    pub zone_id: String,
}

impl DomainSpec {
    pub fn new(hostname: impl Into<String>, zone_id: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            zone_id: zone_id.into(),
        }
    }
}

/// Static hosting project (assets are published separately)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticHostingSpec {
    pub name: String,

    #[serde(default)]
    pub build: BuildSettings,
}

impl StaticHostingSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            build: BuildSettings::default(),
        }
    }

    pub fn with_build(mut self, build: BuildSettings) -> Self {
        self.build = build;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,

    #[serde(default = "default_branch")]
    pub production_branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            command: None,
            output_dir: None,
            root_dir: None,
            production_branch: default_branch(),
        }
    }
}
