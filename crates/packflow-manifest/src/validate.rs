//! Structural validation
//!
//! Collects every defect instead of stopping at the first one so callers can
//! report all problems at once.

use crate::error::ValidationIssue;
use crate::model::{PackageInfo, ResourceKind, Resources};
use std::collections::BTreeMap;

/// Validate package info and resources together
pub(crate) fn validate_parts(info: &PackageInfo, resources: &Resources) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if info.name.trim().is_empty() {
        issues.push(ValidationIssue::MissingField("name"));
    }

    if info.slug.trim().is_empty() {
        issues.push(ValidationIssue::MissingField("slug"));
    } else if !is_valid_slug(&info.slug) {
        issues.push(ValidationIssue::InvalidSlug(info.slug.clone()));
    }

    if info.version.trim().is_empty() {
        issues.push(ValidationIssue::MissingField("version"));
    }

    if info.description.trim().is_empty() {
        issues.push(ValidationIssue::MissingField("description"));
    }

    match info.price {
        None => issues.push(ValidationIssue::MissingPrice),
        Some(0) => issues.push(ValidationIssue::ZeroPrice),
        Some(_) => {}
    }

    if info.tier.is_none() {
        issues.push(ValidationIssue::MissingTier);
    }

    if resources.compute_functions.is_empty() {
        issues.push(ValidationIssue::NoComputeFunctions);
    }

    for function in &resources.compute_functions {
        if !function.has_code() {
            issues.push(ValidationIssue::MissingFunctionCode(function.name.clone()));
        }
    }

    for record in &resources.dns_records {
        if record.content.trim().is_empty() {
            issues.push(ValidationIssue::EmptyDnsContent(record.name.clone()));
        }
    }

    if let Some(domain) = &resources.custom_domain
        && (domain.hostname.trim().is_empty() || domain.zone_id.trim().is_empty())
    {
        issues.push(ValidationIssue::IncompleteCustomDomain);
    }

    issues.extend(binding_collisions(resources));

    issues
}

/// Variable name a function uses to reach a database or bucket
///
/// Upper-cases the resource name and replaces every character outside
/// `[A-Za-z0-9]` with `_`, so `orders-db` becomes `ORDERS_DB`.
pub fn binding_name(resource_name: &str) -> String {
    resource_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Every database and bucket is bound into every function, so their
/// derived names share one space.
fn binding_collisions(resources: &Resources) -> Vec<ValidationIssue> {
    let databases = resources
        .databases
        .iter()
        .map(|db| (ResourceKind::Database, db.name.as_str()));
    let buckets = resources
        .object_buckets
        .iter()
        .map(|b| (ResourceKind::ObjectBucket, b.name.as_str()));

    let mut by_binding: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (kind, name) in databases.chain(buckets) {
        by_binding
            .entry(binding_name(name))
            .or_default()
            .push(format!("{} '{}'", kind, name));
    }

    by_binding
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(binding, names)| ValidationIssue::BindingNameCollision {
            binding,
            resources: names,
        })
        .collect()
}

/// Lowercase ASCII alphanumerics and inner hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BucketSpec, DatabaseSpec};

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("coffee-shop"));
        assert!(is_valid_slug("shop42"));
        assert!(!is_valid_slug("Coffee"));
        assert!(!is_valid_slug("-shop"));
        assert!(!is_valid_slug("shop-"));
        assert!(!is_valid_slug("coffee shop"));
        assert!(!is_valid_slug("café"));
    }

    #[test]
    fn test_binding_name() {
        assert_eq!(binding_name("orders-db"), "ORDERS_DB");
        assert_eq!(binding_name("user.uploads"), "USER_UPLOADS");
        assert_eq!(binding_name("cache2"), "CACHE2");
        assert_eq!(binding_name("café"), "CAF_");
    }

    #[test]
    fn test_binding_collisions() {
        let resources = Resources {
            databases: vec![
                DatabaseSpec::new("orders-db"),
                DatabaseSpec::new("orders_db"),
                DatabaseSpec::new("assets"),
            ],
            object_buckets: vec![BucketSpec::new("assets"), BucketSpec::new("receipts")],
            ..Default::default()
        };

        let issues = binding_collisions(&resources);
        assert_eq!(issues.len(), 2);
        match &issues[0] {
            ValidationIssue::BindingNameCollision { binding, resources } => {
                assert_eq!(binding, "ASSETS");
                assert_eq!(resources.len(), 2);
                assert!(resources[0].contains("'assets'"));
            }
            other => panic!("Expected BindingNameCollision, got {:?}", other),
        }
        assert!(matches!(
            &issues[1],
            ValidationIssue::BindingNameCollision { binding, .. } if binding == "ORDERS_DB"
        ));
    }

    #[test]
    fn test_distinct_bindings_pass() {
        let resources = Resources {
            databases: vec![DatabaseSpec::new("orders-db")],
            object_buckets: vec![BucketSpec::new("orders-files")],
            ..Default::default()
        };
        assert!(binding_collisions(&resources).is_empty());
    }
}
