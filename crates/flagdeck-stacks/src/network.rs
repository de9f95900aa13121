//! Network stack
//!
//! One isolated network with private, egress-capable subnets. Compute placed
//! here can reach external services without being publicly reachable.

use crate::config::DeployConfig;
use flagdeck_cloud::{ResourceSpec, Result, Template};
use serde_json::json;

pub const VPC_NAME: &str = "feature-flip-vpc";
const VPC_CIDR: &str = "10.0.0.0/16";

/// Availability-zone suffixes the subnets spread across
const ZONE_SUFFIXES: [&str; 2] = ["a", "b"];

/// Exported network identity and placement
#[derive(Debug, Clone)]
pub struct NetworkHandle {
    pub vpc_id: String,
    pub private_subnet_ids: Vec<String>,
}

pub struct NetworkStack;

impl NetworkStack {
    pub fn provision(template: &mut Template, config: &DeployConfig) -> Result<NetworkHandle> {
        let subnets: Vec<serde_json::Value> = ZONE_SUFFIXES
            .iter()
            .map(|az| {
                json!({
                    "id": format!("{VPC_NAME}-private-{az}"),
                    "availability_zone": format!("{}{az}", config.region),
                    "tier": "private-egress",
                })
            })
            .collect();

        template.add_resource(ResourceSpec::new(
            "vpc",
            VPC_NAME,
            json!({
                "name": VPC_NAME,
                "cidr": VPC_CIDR,
                "subnets": subnets,
            }),
        ))?;

        let private_subnet_ids = ZONE_SUFFIXES
            .iter()
            .map(|az| format!("{VPC_NAME}-private-{az}"))
            .collect();

        tracing::info!(vpc = VPC_NAME, "network provisioned");

        Ok(NetworkHandle {
            vpc_id: VPC_NAME.to_string(),
            private_subnet_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vpc_exposes_private_egress_subnets() {
        let mut template = Template::new();
        let config = DeployConfig::new("us-east-1");

        let handle = NetworkStack::provision(&mut template, &config).unwrap();

        assert_eq!(template.resources.count_of("vpc"), 1);
        assert_eq!(handle.vpc_id, VPC_NAME);
        assert_eq!(handle.private_subnet_ids.len(), 2);

        let vpc = template.resources.get("vpc", VPC_NAME).unwrap();
        let subnets: Vec<serde_json::Value> = vpc.property("subnets").unwrap();
        assert!(subnets.iter().all(|s| s["tier"] == "private-egress"));
        assert_eq!(subnets[0]["availability_zone"], "us-east-1a");
    }
}
