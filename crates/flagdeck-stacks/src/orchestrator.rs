//! Deployment orchestrator
//!
//! Constructs the stacks in the one valid topological order and threads each
//! exported handle into its consumers as explicit arguments. Network, storage
//! and identity have no cross-dependency; compute needs network and storage;
//! edge needs compute and, optionally, the domain configuration. The first
//! error aborts the whole composition — no partial deployment is ever
//! returned, and cleanup of anything already created is the platform's
//! removal-policy job.

use crate::compute::{ComputeStack, FunctionHandle, ARTIFACT_OBJECT_KEY};
use crate::config::DeployConfig;
use crate::edge::{EdgeHandle, EdgeStack};
use crate::identity::{IdentityHandle, IdentityStack};
use crate::network::NetworkStack;
use crate::storage::StorageStack;
use flagdeck_cloud::{Result, Template};

/// Top-level handles external callers need
#[derive(Debug, Clone)]
pub struct DeploymentHandles {
    pub identity: IdentityHandle,
    pub function: FunctionHandle,
    pub edge: EdgeHandle,
}

/// A fully composed deployment
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Synthesized template, handed to the provisioning platform
    pub template: Template,
    pub handles: DeploymentHandles,
}

/// Compose the full feature-flag backend for the given configuration
pub fn compose(config: &DeployConfig) -> Result<Deployment> {
    tracing::info!(region = %config.region, domain = config.domain.is_some(), "composing deployment");

    let mut template = Template::new();

    let network = NetworkStack::provision(&mut template, config)?;
    let storage = StorageStack::provision(&mut template)?;
    let identity = IdentityStack::provision(&mut template, config)?;

    let artifact_key = config.artifact_key.as_deref().unwrap_or(ARTIFACT_OBJECT_KEY);
    let function = ComputeStack::provision(
        &mut template,
        &network,
        &storage.api_keys,
        &storage.feature_flags,
        &storage.account_usage,
        &storage.artifact_bucket,
        artifact_key,
    )?;

    let edge = EdgeStack::provision(&mut template, config, &function)?;

    tracing::info!(resources = template.resources.len(), "composition complete");

    Ok(Deployment {
        template,
        handles: DeploymentHandles {
            identity,
            function,
            edge,
        },
    })
}
