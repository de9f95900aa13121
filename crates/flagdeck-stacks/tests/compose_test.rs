//! End-to-end composition scenarios over the synthesized template

use flagdeck_cloud::CloudError;
use flagdeck_stacks::{compose, DeployConfig, DomainConfig};

fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

#[test]
fn deploy_without_domain() {
    let deployment = compose(&DeployConfig::new("us-east-1")).unwrap();
    let resources = &deployment.template.resources;

    assert_eq!(resources.count_of("rest-api"), 1);
    assert_eq!(resources.count_of("api-route"), 2);
    assert!(resources.get("api-route", "feature-flags").is_some());
    assert!(resources.get("api-route", "feature-flags/{flagName}").is_some());

    assert_eq!(resources.count_of("certificate"), 0);
    assert_eq!(resources.count_of("dns-record"), 0);

    let outputs = &deployment.template.outputs;
    assert!(outputs.contains("ApiUrl"));
    assert!(!outputs.contains("CustomDomainUrl"));
    assert!(deployment.handles.edge.custom_domain_url.is_none());
}

#[test]
fn deploy_with_custom_domain() {
    let domain = DomainConfig::from_parts(s("query.example.com"), s("Z123"), s("example.com"))
        .unwrap()
        .unwrap();
    let deployment = compose(&DeployConfig::new("us-east-1").with_domain(domain)).unwrap();
    let resources = &deployment.template.resources;

    assert_eq!(resources.count_of("certificate"), 1);
    let cert = resources.get("certificate", "query.example.com").unwrap();
    let validation: serde_json::Value = cert.property("validation").unwrap();
    assert_eq!(validation["method"], "dns");
    assert_eq!(validation["hosted_zone_id"], "Z123");

    assert_eq!(resources.count_of("dns-record"), 1);
    let record = resources.get("dns-record", "query.example.com").unwrap();
    assert_eq!(
        record.property::<String>("alias_target").as_deref(),
        Some("rest-api:feature-flag-api:regional")
    );

    assert_eq!(
        deployment.template.outputs.get("CustomDomainUrl"),
        Some("https://query.example.com")
    );
}

#[test]
fn partial_domain_config_never_composes() {
    // Rejected at the configuration boundary: there is no DeployConfig to
    // compose with, so no resource of any kind can have been created.
    let err =
        DomainConfig::from_parts(s("query.example.com"), s("Z123"), None).unwrap_err();
    assert!(matches!(err, CloudError::InvalidConfig(_)));
}

#[test]
fn identity_deployment_shape() {
    let deployment = compose(&DeployConfig::new("us-east-1")).unwrap();
    let resources = &deployment.template.resources;

    assert_eq!(resources.count_of("user-pool"), 1);
    assert_eq!(resources.count_of("user-pool-client"), 1);
    assert_eq!(resources.count_of("user-pool-domain"), 1);
    assert_eq!(resources.count_of("user-pool-ui"), 1);

    let client = resources
        .get("user-pool-client", "feature-flag-app-client")
        .unwrap();
    let providers: Vec<String> = client.property("supported_identity_providers").unwrap();
    assert_eq!(providers, vec!["COGNITO".to_string()]);

    let pool = resources.get("user-pool", "feature-flag-user-pool").unwrap();
    assert_eq!(pool.property::<bool>("self_sign_up"), Some(true));
    let policy: serde_json::Value = pool.property("password_policy").unwrap();
    assert_eq!(policy["min_length"], 8);
    assert_eq!(policy["require_symbols"], true);

    let outputs = &deployment.template.outputs;
    assert!(outputs.contains("UserPoolId"));
    assert!(outputs.contains("UserPoolClientId"));
    assert_eq!(
        outputs.get("IdentityDomainUrl"),
        Some("https://feature-flip.auth.us-east-1.amazoncognito.com")
    );
}

#[test]
fn full_topology_resource_counts() {
    let deployment = compose(&DeployConfig::new("us-east-1")).unwrap();
    let resources = &deployment.template.resources;

    assert_eq!(resources.count_of("vpc"), 1);
    assert_eq!(resources.count_of("table"), 5);
    assert_eq!(resources.count_of("bucket"), 1);
    assert_eq!(resources.count_of("log-group"), 1);
    assert_eq!(resources.count_of("function"), 1);
    // log write + metrics + three table grants
    assert_eq!(resources.count_of("grant"), 5);
}

#[test]
fn template_serializes_for_the_platform() {
    let deployment = compose(&DeployConfig::new("us-east-1")).unwrap();
    let json = deployment.template.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["version"], 1);
    assert!(json.contains("feature-flag-handler"));
}
