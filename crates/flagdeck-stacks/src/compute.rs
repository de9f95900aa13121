//! Compute stack
//!
//! The request-handling function: placed in the private network, bound to
//! storage, and granted exactly the access each dependency needs. The log
//! destination and its write grant are created before the function itself so
//! a first invocation never races log-group creation.

use crate::network::NetworkHandle;
use crate::storage::{BucketHandle, TableHandle};
use flagdeck_cloud::{CloudError, ResourceSpec, Result, Template};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const FUNCTION_NAME: &str = "feature-flag-handler";
pub const LOG_GROUP_NAME: &str = "/flagdeck/feature-flag-handler";
pub const ARTIFACT_OBJECT_KEY: &str = "FeatureFlagLambda-1.0-SNAPSHOT.jar";

const HANDLER: &str = "flagdeck.handler.FeatureFlagQueryHandler::handleRequest";
const RUNTIME: &str = "java21";
const MEMORY_MB: u32 = 512;
const TIMEOUT_SECS: u64 = 30;
const LOG_RETENTION_DAYS: u32 = 7;

/// Extensions the platform accepts as a deployable payload
const DEPLOYABLE_EXTENSIONS: [&str; 2] = [".jar", ".zip"];

/// Access level carried by a grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    Read,
    ReadWrite,
    Write,
}

impl AccessMode {
    fn table_actions(self) -> &'static [&'static str] {
        match self {
            AccessMode::Read => &["dynamodb:GetItem", "dynamodb:Query", "dynamodb:BatchGetItem"],
            AccessMode::ReadWrite => &[
                "dynamodb:GetItem",
                "dynamodb:Query",
                "dynamodb:BatchGetItem",
                "dynamodb:PutItem",
                "dynamodb:UpdateItem",
                "dynamodb:DeleteItem",
            ],
            AccessMode::Write => &["dynamodb:PutItem", "dynamodb:UpdateItem"],
        }
    }
}

/// Exported function identity, policy and placement
#[derive(Debug, Clone)]
pub struct FunctionHandle {
    pub function_name: String,
    pub memory_mb: u32,
    pub timeout_secs: u64,
    pub vpc_id: String,
}

pub struct ComputeStack;

impl ComputeStack {
    pub fn provision(
        template: &mut Template,
        network: &NetworkHandle,
        api_keys: &TableHandle,
        feature_flags: &TableHandle,
        account_usage: &TableHandle,
        artifact_bucket: &BucketHandle,
        artifact_key: &str,
    ) -> Result<FunctionHandle> {
        // Deployment-time check, not runtime-recoverable: a function without a
        // deployable payload must fail the whole composition.
        Self::resolve_artifact(artifact_bucket, artifact_key)?;

        template.add_resource(ResourceSpec::new(
            "log-group",
            LOG_GROUP_NAME,
            json!({
                "name": LOG_GROUP_NAME,
                "retention_days": LOG_RETENTION_DAYS,
            }),
        ))?;
        Self::add_grant(
            template,
            format!("{FUNCTION_NAME}-write-logs"),
            AccessMode::Write,
            format!("log-group:{LOG_GROUP_NAME}"),
            &["logs:CreateLogStream", "logs:PutLogEvents"],
        )?;

        template.add_resource(ResourceSpec::new(
            "function",
            FUNCTION_NAME,
            json!({
                "name": FUNCTION_NAME,
                "runtime": RUNTIME,
                "handler": HANDLER,
                "artifact": {
                    "bucket": artifact_bucket.bucket_name,
                    "key": artifact_key,
                },
                "memory_mb": MEMORY_MB,
                "timeout_secs": TIMEOUT_SECS,
                "vpc": network.vpc_id,
                "subnet_ids": network.private_subnet_ids,
                "log_group": LOG_GROUP_NAME,
            }),
        ))?;

        // Unscoped on purpose; the operational requirement for a narrower
        // metric namespace has not been confirmed.
        Self::add_grant(
            template,
            format!("{FUNCTION_NAME}-put-metrics"),
            AccessMode::Write,
            "*",
            &["cloudwatch:PutMetricData"],
        )?;

        // The handler only queries key and flag state; it records usage.
        Self::grant_table(template, api_keys, AccessMode::Read)?;
        Self::grant_table(template, feature_flags, AccessMode::Read)?;
        Self::grant_table(template, account_usage, AccessMode::ReadWrite)?;

        tracing::info!(function = FUNCTION_NAME, vpc = %network.vpc_id, "compute provisioned");

        Ok(FunctionHandle {
            function_name: FUNCTION_NAME.to_string(),
            memory_mb: MEMORY_MB,
            timeout_secs: TIMEOUT_SECS,
            vpc_id: network.vpc_id.clone(),
        })
    }

    fn resolve_artifact(bucket: &BucketHandle, key: &str) -> Result<()> {
        let deployable =
            !key.trim().is_empty() && DEPLOYABLE_EXTENSIONS.iter().any(|ext| key.ends_with(ext));
        if !deployable {
            return Err(CloudError::ArtifactNotFound(format!(
                "s3://{}/{key} is not a deployable payload",
                bucket.bucket_name
            )));
        }
        Ok(())
    }

    fn grant_table(template: &mut Template, table: &TableHandle, access: AccessMode) -> Result<()> {
        let suffix = match access {
            AccessMode::Read => "read",
            AccessMode::ReadWrite => "read-write",
            AccessMode::Write => "write",
        };
        Self::add_grant(
            template,
            format!("{FUNCTION_NAME}-{suffix}-{}", table.table_name),
            access,
            format!("table:{}", table.table_name),
            access.table_actions(),
        )
    }

    fn add_grant(
        template: &mut Template,
        id: String,
        access: AccessMode,
        resource: impl Into<String>,
        actions: &[&str],
    ) -> Result<()> {
        template.add_resource(ResourceSpec::new(
            "grant",
            id,
            json!({
                "grantee": FUNCTION_NAME,
                "access": access,
                "resource": resource.into(),
                "actions": actions,
            }),
        ))
    }
}
