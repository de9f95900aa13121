//! Synthesized deployment template
//!
//! One composition pass fills a [`Template`] with resource specifications and
//! operator-facing outputs. The template is what the provisioning platform
//! consumes; it carries no construction internals, only declarative specs.

use crate::error::{CloudError, Result};
use crate::resource::{ResourceSet, ResourceSpec};
use serde::{Deserialize, Serialize};

const TEMPLATE_VERSION: u32 = 1;

/// Deployment-time output consumed by operators and tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub key: String,
    pub value: String,
    pub description: String,
}

/// Ordered set of deployment outputs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputSet {
    outputs: Vec<Output>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        let key = key.into();
        if self.outputs.iter().any(|o| o.key == key) {
            return Err(CloudError::DuplicateOutput(key));
        }
        self.outputs.push(Output {
            key,
            value: value.into(),
            description: description.into(),
        });
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Synthesis target for one composition pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Template format version
    pub version: u32,

    /// Resource specifications, in creation order
    pub resources: ResourceSet,

    /// Operator-facing outputs
    pub outputs: OutputSet,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            version: TEMPLATE_VERSION,
            resources: ResourceSet::new(),
            outputs: OutputSet::new(),
        }
    }
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource specification
    pub fn add_resource(&mut self, resource: ResourceSpec) -> Result<()> {
        tracing::debug!(key = %resource.key(), "adding resource");
        self.resources.add(resource)
    }

    /// Register a deployment output
    pub fn add_output(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        self.outputs.add(key, value, description)
    }

    /// Render the template as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
