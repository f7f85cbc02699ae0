use crate::model::ResourceKind;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: ResourceKind },

    #[error("duplicate {kind}: '{name}' is already defined")]
    DuplicateResource { kind: ResourceKind, name: String },

    #[error("manifest is invalid:\n{0}")]
    Validation(ValidationErrors),

    #[error("cannot export manifest without {0}")]
    MissingPackageInfo(&'static str),

    #[error("manifest document parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("manifest YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported manifest file: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {path}\nreason: {message}")]
    Io { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ManifestError>;

/// A single structural defect found by `validate()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("package {0} is missing")]
    MissingField(&'static str),

    #[error("package price is missing")]
    MissingPrice,

    #[error("package price must be greater than zero")]
    ZeroPrice,

    #[error("package tier is missing")]
    MissingTier,

    #[error("slug '{0}' must be lowercase letters, digits and '-' only")]
    InvalidSlug(String),

    #[error("at least one compute function is required")]
    NoComputeFunctions,

    #[error("compute function '{0}' has no code")]
    MissingFunctionCode(String),

    #[error("DNS record '{0}' has no content")]
    EmptyDnsContent(String),

    #[error("custom domain requires both hostname and zone id")]
    IncompleteCustomDomain,

    /// Two databases or buckets would be injected under the same name
    #[error("binding {binding} is shared by {}", .resources.join(", "))]
    BindingNameCollision {
        binding: String,
        resources: Vec<String>,
    },
}

/// Every issue found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", issue)?;
        }
        Ok(())
    }
}
