//! Manifest data model
//!
//! Every resource kind a package can declare, grouped by concern.
//! All types serialize with camelCase keys to match the manifest document.

mod compute;
mod hook;
mod info;
mod manifest;
mod network;
mod storage;

// Re-exports
pub use compute::*;
pub use hook::*;
pub use info::*;
pub use manifest::*;
pub use network::*;
pub use storage::*;

use serde::{Deserialize, Serialize};

/// Kinds of resources a manifest declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    ComputeFunction,
    Database,
    ObjectBucket,
    DnsRecord,
    StaticHosting,
    CustomDomain,
    PostDeployHook,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::ComputeFunction => write!(f, "compute function"),
            ResourceKind::Database => write!(f, "database"),
            ResourceKind::ObjectBucket => write!(f, "object bucket"),
            ResourceKind::DnsRecord => write!(f, "DNS record"),
            ResourceKind::StaticHosting => write!(f, "static hosting project"),
            ResourceKind::CustomDomain => write!(f, "custom domain"),
            ResourceKind::PostDeployHook => write!(f, "post-deploy hook"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_function_serialization() {
        let function = ComputeFunctionSpec::new("api", "export default {}")
            .with_route("api.example.com/*")
            .with_schedule("*/5 * * * *")
            .with_env("MODE", "production");

        let json = serde_json::to_value(&function).unwrap();
        assert_eq!(json["name"], "api");
        assert_eq!(json["routes"][0], "api.example.com/*");
        assert_eq!(json["schedule"], "*/5 * * * *");
        assert_eq!(json["env"]["MODE"], "production");
    }

    #[test]
    fn test_dns_record_type_key() {
        let record = DnsRecordSpec::new(DnsRecordType::Cname, "www.${domain}", "${domain}");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "CNAME");
        assert_eq!(json["ttl"], 1);
        assert_eq!(json["proxied"], true);
    }

    #[test]
    fn test_bucket_defaults() {
        let bucket: BucketSpec = serde_json::from_str(r#"{ "name": "uploads" }"#).unwrap();
        assert_eq!(bucket.name, "uploads");
        assert!(!bucket.cors);
        assert_eq!(bucket.storage_class, StorageClass::Standard);
    }

    #[test]
    fn test_hosting_default_branch() {
        let hosting: StaticHostingSpec =
            serde_json::from_str(r#"{ "name": "storefront", "build": {} }"#).unwrap();
        assert_eq!(hosting.build.production_branch, "main");
    }

    #[test]
    fn test_tier_parse() {
        let tier: Tier = serde_json::from_str(r#""growth""#).unwrap();
        assert_eq!(tier, Tier::Growth);
        assert_eq!(tier.to_string(), "growth");
    }
}
