//! Post-deploy hook model

use serde::{Deserialize, Serialize};

/// Action run after all resources are provisioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpec {
    pub name: String,

    pub kind: HookKind,

    /// Kind-specific settings, interpreted by the hook runner
    #[serde(default)]
    pub config: serde_json::Value,
}

impl HookSpec {
    pub fn new(name: impl Into<String>, kind: HookKind, config: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            kind,
            config,
        }
    }

    /// Get a string setting from `config`
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Webhook,
    Email,
    Function,
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookKind::Webhook => write!(f, "webhook"),
            HookKind::Email => write!(f, "email"),
            HookKind::Function => write!(f, "function"),
        }
    }
}
