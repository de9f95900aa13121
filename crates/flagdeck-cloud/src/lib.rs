//! flagdeck cloud resource model
//!
//! This crate provides the declarative resource model flagdeck composes
//! deployments into: resource specifications, the synthesized template, and
//! the composition error taxonomy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  flagdeck CLI                    │
//! │                 (flagdeck synth)                 │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               flagdeck-stacks                    │
//! │   network → storage → identity → compute → edge  │
//! └─────────────────┬───────────────────────────────┘
//!                   │ ResourceSpec / Output
//! ┌─────────────────▼───────────────────────────────┐
//! │               flagdeck-cloud                     │
//! │        Template { ResourceSet, OutputSet }       │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The template is handed to the provisioning platform as-is; diffing,
//! applying and teardown (per [`RemovalPolicy`]) are the platform's job, not
//! this crate's.

pub mod error;
pub mod resource;
pub mod template;

// Re-exports
pub use error::{CloudError, Result};
pub use resource::{RemovalPolicy, ResourceSet, ResourceSpec};
pub use template::{Output, OutputSet, Template};
