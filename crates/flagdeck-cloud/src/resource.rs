//! Declarative resource specifications
//!
//! A [`ResourceSpec`] describes one cloud resource to be created by the
//! provisioning platform; a [`ResourceSet`] collects every spec a composition
//! pass produced, in creation order.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};

/// What the platform does with a resource when the deployment is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Delete the resource together with the deployment
    Destroy,
    /// Leave the resource behind
    Retain,
}

impl std::fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalPolicy::Destroy => write!(f, "destroy"),
            RemovalPolicy::Retain => write!(f, "retain"),
        }
    }
}

/// Specification for a single cloud resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Resource type (e.g. "vpc", "table", "rest-api")
    pub resource_type: String,

    /// Resource identifier, unique within its type
    pub id: String,

    /// Resource-specific properties
    pub properties: serde_json::Value,

    /// Teardown behavior, applied by the platform
    pub removal_policy: RemovalPolicy,
}

impl ResourceSpec {
    pub fn new(
        resource_type: impl Into<String>,
        id: impl Into<String>,
        properties: serde_json::Value,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            properties,
            removal_policy: RemovalPolicy::Destroy,
        }
    }

    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }

    /// Full resource key (type:id)
    pub fn key(&self) -> String {
        format!("{}:{}", self.resource_type, self.id)
    }

    /// Get a property value as a specific type
    pub fn property<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.properties
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Ordered set of resource specifications
///
/// Insertion order is creation order: a resource appended later may reference
/// any resource appended earlier, never the other way around. Keys (type:id)
/// are unique; a duplicate is a composition bug, not a recoverable condition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSet {
    resources: Vec<ResourceSpec>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource, rejecting duplicate keys
    pub fn add(&mut self, resource: ResourceSpec) -> Result<()> {
        let key = resource.key();
        if self.resources.iter().any(|r| r.key() == key) {
            return Err(CloudError::DuplicateResource(key));
        }
        self.resources.push(resource);
        Ok(())
    }

    pub fn get(&self, resource_type: &str, id: &str) -> Option<&ResourceSpec> {
        self.resources
            .iter()
            .find(|r| r.resource_type == resource_type && r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter()
    }

    pub fn by_type(&self, resource_type: &str) -> Vec<&ResourceSpec> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    /// Number of resources of a given type
    pub fn count_of(&self, resource_type: &str) -> usize {
        self.by_type(resource_type).len()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Creation-order position of a resource, if present
    pub fn position_of(&self, resource_type: &str, id: &str) -> Option<usize> {
        self.resources
            .iter()
            .position(|r| r.resource_type == resource_type && r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_key_combines_type_and_id() {
        let spec = ResourceSpec::new("table", "FeatureFlag", json!({}));
        assert_eq!(spec.key(), "table:FeatureFlag");
        assert_eq!(spec.removal_policy, RemovalPolicy::Destroy);

        let retained = spec.with_removal_policy(RemovalPolicy::Retain);
        assert_eq!(retained.removal_policy, RemovalPolicy::Retain);
    }

    #[test]
    fn typed_property_access() {
        let spec = ResourceSpec::new(
            "function",
            "handler",
            json!({ "memory_mb": 512, "handler": "main" }),
        );
        assert_eq!(spec.property::<u32>("memory_mb"), Some(512));
        assert_eq!(spec.property::<String>("handler").as_deref(), Some("main"));
        assert_eq!(spec.property::<u32>("missing"), None);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut set = ResourceSet::new();
        set.add(ResourceSpec::new("bucket", "artifacts", json!({})))
            .unwrap();
        let err = set
            .add(ResourceSpec::new("bucket", "artifacts", json!({})))
            .unwrap_err();
        assert!(matches!(err, CloudError::DuplicateResource(_)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut set = ResourceSet::new();
        set.add(ResourceSpec::new("log-group", "lg", json!({}))).unwrap();
        set.add(ResourceSpec::new("function", "fn", json!({}))).unwrap();
        assert!(set.position_of("log-group", "lg") < set.position_of("function", "fn"));
    }

    #[test]
    fn by_type_filters() {
        let mut set = ResourceSet::new();
        set.add(ResourceSpec::new("table", "A", json!({}))).unwrap();
        set.add(ResourceSpec::new("table", "B", json!({}))).unwrap();
        set.add(ResourceSpec::new("bucket", "C", json!({}))).unwrap();
        assert_eq!(set.count_of("table"), 2);
        assert_eq!(set.count_of("bucket"), 1);
        assert_eq!(set.count_of("vpc"), 0);
    }
}
