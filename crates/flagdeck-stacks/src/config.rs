//! Deployment configuration
//!
//! The only inputs the composition takes: the target region and an optional
//! custom-domain triple. The triple is all-or-nothing; a partially specified
//! one is a configuration error, never a silent fallback to "no domain".

use flagdeck_cloud::{CloudError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Global configuration for one composition pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Target region
    pub region: String,

    /// Custom-domain configuration, present only when fully specified
    pub domain: Option<DomainConfig>,

    /// Deployment artifact object key in the artifact bucket, overriding the
    /// built-in default
    pub artifact_key: Option<String>,
}

impl DeployConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            domain: None,
            artifact_key: None,
        }
    }

    pub fn with_domain(mut self, domain: DomainConfig) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_artifact_key(mut self, key: impl Into<String>) -> Self {
        self.artifact_key = Some(key.into());
        self
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

/// Fully specified custom-domain configuration
///
/// Only constructible through [`DomainConfig::from_parts`], so a value of this
/// type always carries all three fields. Fields are private: downstream stacks
/// read them through accessors and cannot rewire a domain after composition
/// started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    domain_name: String,
    hosted_zone_id: String,
    hosted_zone_name: String,
}

impl DomainConfig {
    /// Validate an optional triple into either no domain or a full one
    ///
    /// Empty strings count as absent. One or two fields present is rejected:
    /// the caller clearly intended a custom domain, and proceeding without one
    /// would produce a domainless deployment behind their back.
    pub fn from_parts(
        domain_name: Option<String>,
        hosted_zone_id: Option<String>,
        hosted_zone_name: Option<String>,
    ) -> Result<Option<Self>> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        match (
            present(&domain_name),
            present(&hosted_zone_id),
            present(&hosted_zone_name),
        ) {
            (false, false, false) => Ok(None),
            (true, true, true) => Ok(Some(Self {
                domain_name: domain_name.unwrap_or_default(),
                hosted_zone_id: hosted_zone_id.unwrap_or_default(),
                hosted_zone_name: hosted_zone_name.unwrap_or_default(),
            })),
            (has_name, has_id, has_zone) => {
                let mut missing = Vec::new();
                if !has_name {
                    missing.push("domain-name");
                }
                if !has_id {
                    missing.push("hosted-zone-id");
                }
                if !has_zone {
                    missing.push("hosted-zone-name");
                }
                Err(CloudError::InvalidConfig(format!(
                    "custom domain requires domain-name, hosted-zone-id and hosted-zone-name together (missing: {})",
                    missing.join(", ")
                )))
            }
        }
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn hosted_zone_id(&self) -> &str {
        &self.hosted_zone_id
    }

    pub fn hosted_zone_name(&self) -> &str {
        &self.hosted_zone_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn absent_triple_means_no_domain() {
        let domain = DomainConfig::from_parts(None, None, None).unwrap();
        assert!(domain.is_none());
    }

    #[test]
    fn full_triple_is_accepted() {
        let domain =
            DomainConfig::from_parts(s("query.example.com"), s("Z123"), s("example.com"))
                .unwrap()
                .unwrap();
        assert_eq!(domain.domain_name(), "query.example.com");
        assert_eq!(domain.hosted_zone_id(), "Z123");
        assert_eq!(domain.hosted_zone_name(), "example.com");
    }

    #[test]
    fn partial_triple_is_rejected() {
        let err = DomainConfig::from_parts(s("query.example.com"), None, None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("hosted-zone-id"));
        assert!(msg.contains("hosted-zone-name"));
        assert!(!msg.contains("missing: domain-name"));

        assert!(DomainConfig::from_parts(None, s("Z123"), s("example.com")).is_err());
        assert!(DomainConfig::from_parts(s("a.example.com"), s("Z123"), None).is_err());
    }

    #[test]
    fn empty_string_counts_as_absent() {
        assert!(DomainConfig::from_parts(s(""), s(""), s("")).unwrap().is_none());
        assert!(DomainConfig::from_parts(s("query.example.com"), s(""), s("example.com")).is_err());
    }
}
