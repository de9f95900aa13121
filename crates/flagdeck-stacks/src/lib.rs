//! flagdeck backend topology
//!
//! The fixed stack composition for the feature-flag service backend: an
//! isolated network, persistent storage, an identity directory, the
//! request-handling function and the public API edge, composed in dependency
//! order into one synthesized [`flagdeck_cloud::Template`].
//!
//! Each stack is a plain constructor taking the synthesis target plus the
//! upstream handles it consumes; it returns an immutable handle exposing only
//! identity and minimal shape. [`orchestrator::compose`] is the entry point.

pub mod compute;
pub mod config;
pub mod edge;
pub mod identity;
pub mod network;
pub mod orchestrator;
pub mod storage;

// Re-exports
pub use compute::{AccessMode, ComputeStack, FunctionHandle};
pub use config::{DeployConfig, DomainConfig, DEFAULT_REGION};
pub use edge::{EdgeHandle, EdgeStack};
pub use identity::{IdentityHandle, IdentityStack};
pub use network::{NetworkHandle, NetworkStack};
pub use orchestrator::{compose, Deployment, DeploymentHandles};
pub use storage::{
    BucketHandle, GlobalIndex, KeyAttribute, LocalIndex, StorageHandles, StorageStack, TableHandle,
    TableSpec,
};
