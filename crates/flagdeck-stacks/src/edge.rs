//! Edge stack
//!
//! Public HTTP entry point for flag queries, backed by the compute handle.
//! With a fully specified [`DomainConfig`] it also issues a TLS certificate,
//! attaches the custom domain to the API and creates a DNS alias record; with
//! no domain config only the default endpoint is emitted. The partial case
//! never reaches this stack (see `config`).

use crate::compute::FunctionHandle;
use crate::config::{DeployConfig, DomainConfig};
use flagdeck_cloud::{CloudError, ResourceSpec, Result, Template};
use serde_json::json;

pub const REST_API_NAME: &str = "feature-flag-api";
pub const FLAGS_ROUTE: &str = "feature-flags";
pub const FLAG_BY_NAME_ROUTE: &str = "feature-flags/{flagName}";

const API_DISPLAY_NAME: &str = "Feature Flag Service";
const STAGE_NAME: &str = "prod";

/// Exported entry-point identity and URLs
#[derive(Debug, Clone)]
pub struct EdgeHandle {
    pub rest_api_id: String,
    pub api_url: String,
    /// Present only when a custom domain was configured
    pub custom_domain_url: Option<String>,
}

pub struct EdgeStack;

impl EdgeStack {
    pub fn provision(
        template: &mut Template,
        config: &DeployConfig,
        function: &FunctionHandle,
    ) -> Result<EdgeHandle> {
        let custom_domain = match &config.domain {
            Some(domain) => {
                Self::resolve_hosted_zone(domain)?;
                Self::add_certificate(template, domain)?;
                Some(json!({
                    "domain_name": domain.domain_name(),
                    "certificate": domain.domain_name(),
                }))
            }
            None => None,
        };

        template.add_resource(ResourceSpec::new(
            "rest-api",
            REST_API_NAME,
            json!({
                "name": API_DISPLAY_NAME,
                "description": "This service provides access to feature flags",
                "stage": STAGE_NAME,
                // Public read API: any origin, any method
                "cors": { "allow_origins": "*", "allow_methods": "*" },
                "custom_domain": custom_domain,
            }),
        ))?;

        // Bulk query: full proxy, caller's API key lifted into a top-level field
        template.add_resource(ResourceSpec::new(
            "api-route",
            FLAGS_ROUTE,
            json!({
                "rest_api": REST_API_NAME,
                "path": format!("/{FLAGS_ROUTE}"),
                "method": "GET",
                "integration": {
                    "function": function.function_name,
                    "proxy": true,
                    "request_template": { "apiKey": "$input.params().header.x-api-key" },
                },
            }),
        ))?;

        // Single-flag query: full proxy
        template.add_resource(ResourceSpec::new(
            "api-route",
            FLAG_BY_NAME_ROUTE,
            json!({
                "rest_api": REST_API_NAME,
                "path": format!("/{FLAG_BY_NAME_ROUTE}"),
                "method": "GET",
                "integration": {
                    "function": function.function_name,
                    "proxy": true,
                },
            }),
        ))?;

        let api_url = format!(
            "https://{REST_API_NAME}.execute-api.{}.amazonaws.com/{STAGE_NAME}",
            config.region
        );
        template.add_output("ApiUrl", api_url.clone(), "Default API endpoint URL")?;

        let custom_domain_url = match &config.domain {
            Some(domain) => {
                Self::add_alias_record(template, domain)?;
                let url = format!("https://{}", domain.domain_name());
                template.add_output("CustomDomainUrl", url.clone(), "Custom API domain URL")?;
                Some(url)
            }
            None => None,
        };

        tracing::info!(
            api = REST_API_NAME,
            custom_domain = config.domain.is_some(),
            "edge provisioned"
        );

        Ok(EdgeHandle {
            rest_api_id: REST_API_NAME.to_string(),
            api_url,
            custom_domain_url,
        })
    }

    /// The zone resolved by id+name must be able to serve the domain, or
    /// certificate validation and the alias record would both dangle.
    fn resolve_hosted_zone(domain: &DomainConfig) -> Result<()> {
        let name = domain.domain_name();
        let zone = domain.hosted_zone_name();
        let served = name == zone || name.ends_with(&format!(".{zone}"));
        if !served {
            return Err(CloudError::ZoneNotFound(format!(
                "zone {} ({}) does not serve {name}",
                domain.hosted_zone_id(),
                zone
            )));
        }
        Ok(())
    }

    fn add_certificate(template: &mut Template, domain: &DomainConfig) -> Result<()> {
        template.add_resource(ResourceSpec::new(
            "certificate",
            domain.domain_name(),
            json!({
                "domain_name": domain.domain_name(),
                "validation": {
                    "method": "dns",
                    "hosted_zone_id": domain.hosted_zone_id(),
                    "hosted_zone_name": domain.hosted_zone_name(),
                },
            }),
        ))
    }

    fn add_alias_record(template: &mut Template, domain: &DomainConfig) -> Result<()> {
        template.add_resource(ResourceSpec::new(
            "dns-record",
            domain.domain_name(),
            json!({
                "hosted_zone_id": domain.hosted_zone_id(),
                "hosted_zone_name": domain.hosted_zone_name(),
                "record_type": "A",
                "name": domain.domain_name(),
                "alias_target": format!("rest-api:{REST_API_NAME}:regional"),
            }),
        ))
    }
}
