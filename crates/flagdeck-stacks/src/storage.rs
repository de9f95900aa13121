//! Storage stack
//!
//! Persistent tables for the feature-flag service plus the artifact bucket
//! the compute stack deploys from. A table's primary key schema is fixed at
//! creation; secondary indexes are declared explicitly at creation time and
//! never by mutating the primary key.

use flagdeck_cloud::{CloudError, ResourceSpec, Result, Template};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const ENVIRONMENT_TABLE: &str = "Environment";
pub const API_KEY_TABLE: &str = "EnvApiKey";
pub const FEATURE_FLAG_TABLE: &str = "FeatureFlag";
pub const ACCOUNT_USAGE_TABLE: &str = "AccountUsage";
pub const METRICS_TABLE: &str = "ApiMetrics";
pub const ARTIFACT_BUCKET: &str = "feature-flip-artifacts";

/// Attribute value kind for key schema members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    #[serde(rename = "S")]
    String,
    #[serde(rename = "N")]
    Number,
}

/// One component of a primary or index key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl KeyAttribute {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::String,
        }
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Number,
        }
    }
}

/// Alternate sort order under the table's own partition key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalIndex {
    pub name: String,
    pub sort_key: KeyAttribute,
}

/// Independent partition+sort key pair over the same table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalIndex {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
}

/// Declarative table definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub local_indexes: Vec<LocalIndex>,
    pub global_indexes: Vec<GlobalIndex>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, partition_key: KeyAttribute) -> Self {
        Self {
            name: name.into(),
            partition_key,
            sort_key: None,
            local_indexes: Vec::new(),
            global_indexes: Vec::new(),
        }
    }

    pub fn with_sort_key(mut self, sort_key: KeyAttribute) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    pub fn with_local_index(mut self, name: impl Into<String>, sort_key: KeyAttribute) -> Self {
        self.local_indexes.push(LocalIndex {
            name: name.into(),
            sort_key,
        });
        self
    }

    pub fn with_global_index(
        mut self,
        name: impl Into<String>,
        partition_key: KeyAttribute,
        sort_key: KeyAttribute,
    ) -> Self {
        self.global_indexes.push(GlobalIndex {
            name: name.into(),
            partition_key,
            sort_key,
        });
        self
    }

    /// A local index must add a sort attribute outside the primary key
    fn validate(&self) -> Result<()> {
        for index in &self.local_indexes {
            let clashes_primary = index.sort_key.name == self.partition_key.name
                || self
                    .sort_key
                    .as_ref()
                    .is_some_and(|sk| sk.name == index.sort_key.name);
            if clashes_primary {
                return Err(CloudError::InvalidConfig(format!(
                    "table {}: local index {} re-uses primary key attribute {}",
                    self.name, index.name, index.sort_key.name
                )));
            }
        }
        Ok(())
    }
}

/// Exported table identity and key shape
#[derive(Debug, Clone)]
pub struct TableHandle {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

/// Exported bucket identity
#[derive(Debug, Clone)]
pub struct BucketHandle {
    pub bucket_name: String,
    pub versioned: bool,
}

/// Every handle the storage stack exports
#[derive(Debug, Clone)]
pub struct StorageHandles {
    pub environment: TableHandle,
    pub api_keys: TableHandle,
    pub feature_flags: TableHandle,
    pub account_usage: TableHandle,
    pub metrics: TableHandle,
    pub artifact_bucket: BucketHandle,
}

pub struct StorageStack;

impl StorageStack {
    pub fn provision(template: &mut Template) -> Result<StorageHandles> {
        let environment = Self::add_table(
            template,
            TableSpec::new(ENVIRONMENT_TABLE, KeyAttribute::string("UserId"))
                .with_sort_key(KeyAttribute::string("Name")),
        )?;

        // Reverse lookup from key value back to its environment entry
        let api_keys = Self::add_table(
            template,
            TableSpec::new(API_KEY_TABLE, KeyAttribute::string("EnvName"))
                .with_sort_key(KeyAttribute::string("KeyId"))
                .with_local_index("KeyValueIndex", KeyAttribute::string("KeyValue")),
        )?;

        let feature_flags = Self::add_table(
            template,
            TableSpec::new(FEATURE_FLAG_TABLE, KeyAttribute::string("EnvName"))
                .with_sort_key(KeyAttribute::string("FlagName"))
                .with_global_index(
                    "OwnerIndex",
                    KeyAttribute::string("UserId"),
                    KeyAttribute::string("FlagName"),
                ),
        )?;

        let account_usage = Self::add_table(
            template,
            TableSpec::new(ACCOUNT_USAGE_TABLE, KeyAttribute::string("UserId")),
        )?;

        // Numeric sort key so metric points can be range-queried by time
        let metrics = Self::add_table(
            template,
            TableSpec::new(METRICS_TABLE, KeyAttribute::string("MetricId"))
                .with_sort_key(KeyAttribute::number("Timestamp")),
        )?;

        template.add_resource(ResourceSpec::new(
            "bucket",
            ARTIFACT_BUCKET,
            json!({ "versioned": true }),
        ))?;

        tracing::info!(
            tables = 5,
            bucket = ARTIFACT_BUCKET,
            "storage provisioned"
        );

        Ok(StorageHandles {
            environment,
            api_keys,
            feature_flags,
            account_usage,
            metrics,
            artifact_bucket: BucketHandle {
                bucket_name: ARTIFACT_BUCKET.to_string(),
                versioned: true,
            },
        })
    }

    fn add_table(template: &mut Template, spec: TableSpec) -> Result<TableHandle> {
        spec.validate()?;

        template.add_resource(ResourceSpec::new(
            "table",
            spec.name.clone(),
            json!({
                "table_name": spec.name,
                "partition_key": spec.partition_key,
                "sort_key": spec.sort_key,
                "local_indexes": spec.local_indexes,
                "global_indexes": spec.global_indexes,
                "billing_mode": "pay_per_request",
            }),
        ))?;

        Ok(TableHandle {
            table_name: spec.name,
            partition_key: spec.partition_key,
            sort_key: spec.sort_key,
        })
    }
}
