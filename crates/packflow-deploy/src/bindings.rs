//! Binding derivation

use crate::result::ResourceHandle;
use packflow_cloud::Binding;
pub use packflow_manifest::binding_name;

/// Bindings for every created database and bucket, databases first
///
/// Names are unique: manifest validation rejects resources whose derived
/// binding names collide.
pub fn plan_bindings(databases: &[ResourceHandle], buckets: &[ResourceHandle]) -> Vec<Binding> {
    let databases = databases.iter().map(|db| Binding::Database {
        name: binding_name(&db.name),
        database_id: db.id.clone(),
    });
    let buckets = buckets.iter().map(|bucket| Binding::Bucket {
        name: binding_name(&bucket.name),
        bucket_name: bucket.name.clone(),
    });
    databases.chain(buckets).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use packflow_manifest::ResourceKind;

    #[test]
    fn test_plan_bindings() {
        let databases = vec![ResourceHandle::new(ResourceKind::Database, "orders-db", "db-1")];
        let buckets = vec![ResourceHandle::new(
            ResourceKind::ObjectBucket,
            "uploads",
            "uploads",
        )];

        let bindings = plan_bindings(&databases, &buckets);
        assert_eq!(
            bindings,
            vec![
                Binding::Database {
                    name: "ORDERS_DB".to_string(),
                    database_id: "db-1".to_string(),
                },
                Binding::Bucket {
                    name: "UPLOADS".to_string(),
                    bucket_name: "uploads".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_resources_no_bindings() {
        assert!(plan_bindings(&[], &[]).is_empty());
    }
}
