//! Deployment error types

use crate::result::PartialDeployment;
use packflow_cloud::CloudError;
use packflow_manifest::{ResourceKind, ValidationErrors};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Manifest is not deployable:\n{0}")]
    Validation(ValidationErrors),

    #[error("Account verification failed: {0}")]
    AccountVerification(String),

    /// Nothing exists yet when the namespace fails
    #[error("Failed to create namespace '{name}': {source}")]
    Namespace {
        name: String,
        #[source]
        source: CloudError,
    },

    #[error("Failed to create {kind} '{name}': {source}")]
    ResourceCreation {
        kind: ResourceKind,
        name: String,
        #[source]
        source: CloudError,
        partial: Box<PartialDeployment>,
    },

    #[error("Failed to configure bindings for '{function}': {source}")]
    BindingConfiguration {
        function: String,
        #[source]
        source: CloudError,
        partial: Box<PartialDeployment>,
    },
}

impl DeployError {
    /// Resources known to exist in the target account when the run stopped
    pub fn partial(&self) -> Option<&PartialDeployment> {
        match self {
            DeployError::ResourceCreation { partial, .. }
            | DeployError::BindingConfiguration { partial, .. } => Some(partial.as_ref()),
            DeployError::Validation(_)
            | DeployError::AccountVerification(_)
            | DeployError::Namespace { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_creation_message() {
        let err = DeployError::ResourceCreation {
            kind: ResourceKind::Database,
            name: "orders-db".to_string(),
            source: CloudError::ApiError("quota exceeded".to_string()),
            partial: Box::default(),
        };
        let message = err.to_string();
        assert!(message.contains("database 'orders-db'"));
        assert!(message.contains("quota exceeded"));
        assert!(err.partial().is_some());
    }

    #[test]
    fn test_early_failures_have_no_partial() {
        let err = DeployError::AccountVerification("no accounts".to_string());
        assert!(err.partial().is_none());
    }
}
