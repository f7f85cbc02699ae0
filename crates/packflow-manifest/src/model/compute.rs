//! Compute function model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A compute function (worker script) to upload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeFunctionSpec {
    /// Unique within the manifest
    pub name: String,

    /// Module source code
    pub code: String,

    /// Route patterns (e.g. `shop.example.com/api/*`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<String>,

    /// Cron expression for scheduled invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    /// Plain-text environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl ComputeFunctionSpec {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.routes.push(route.into());
        self
    }

    pub fn with_schedule(mut self, cron: impl Into<String>) -> Self {
        self.schedule = Some(cron.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}
