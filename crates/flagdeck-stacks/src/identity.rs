//! Identity stack
//!
//! User directory, application client and hosted sign-in domain. Nothing in
//! this topology consumes the identity handle yet; it is exported so a future
//! consumer can be wired in without touching this stack, and its ids are
//! registered as deployment outputs for operators.

use crate::config::DeployConfig;
use flagdeck_cloud::{ResourceSpec, Result, Template};
use serde_json::json;

pub const USER_POOL_NAME: &str = "feature-flag-user-pool";
pub const APP_CLIENT_NAME: &str = "feature-flag-app-client";
pub const HOSTED_DOMAIN_PREFIX: &str = "feature-flip";

const CALLBACK_URL: &str = "http://localhost:5173/callback";
const LOGOUT_URL: &str = "http://localhost:5173/logout";

/// Styling for the hosted sign-in pages, applied to every client
const HOSTED_UI_CSS: &str = "\
.banner-customizable { background-color: #1976d2; }\n\
.logo-customizable { background-image: url('https://onlinepngtools.com/images/logo.png'); }";

/// Exported identity ids and hosted domain
#[derive(Debug, Clone)]
pub struct IdentityHandle {
    pub pool_id: String,
    pub client_id: String,
    pub hosted_domain_url: String,
}

pub struct IdentityStack;

impl IdentityStack {
    pub fn provision(template: &mut Template, config: &DeployConfig) -> Result<IdentityHandle> {
        template.add_resource(ResourceSpec::new(
            "user-pool",
            USER_POOL_NAME,
            json!({
                "name": USER_POOL_NAME,
                "self_sign_up": true,
                "sign_in_aliases": ["email", "username"],
                "auto_verify": ["email"],
                "required_attributes": [
                    { "name": "email", "mutable": true },
                    { "name": "given_name", "mutable": true },
                    { "name": "family_name", "mutable": true },
                ],
                "password_policy": {
                    "min_length": 8,
                    "require_lowercase": true,
                    "require_uppercase": true,
                    "require_digits": true,
                    "require_symbols": true,
                },
                "account_recovery": "email_only",
            }),
        ))?;

        template.add_resource(ResourceSpec::new(
            "user-pool-client",
            APP_CLIENT_NAME,
            json!({
                "name": APP_CLIENT_NAME,
                "user_pool": USER_POOL_NAME,
                "generate_secret": false,
                "auth_flows": ["user_password", "user_srp", "admin_user_password"],
                "oauth": {
                    "flows": ["authorization_code", "implicit"],
                    "scopes": ["email", "openid", "profile"],
                    "callback_urls": [CALLBACK_URL],
                    "logout_urls": [LOGOUT_URL],
                },
                "supported_identity_providers": ["COGNITO"],
            }),
        ))?;

        template.add_resource(ResourceSpec::new(
            "user-pool-domain",
            HOSTED_DOMAIN_PREFIX,
            json!({
                "user_pool": USER_POOL_NAME,
                "domain_prefix": HOSTED_DOMAIN_PREFIX,
            }),
        ))?;

        template.add_resource(ResourceSpec::new(
            "user-pool-ui",
            USER_POOL_NAME,
            json!({
                "user_pool": USER_POOL_NAME,
                "client_id": "ALL",
                "css": HOSTED_UI_CSS,
            }),
        ))?;

        let hosted_domain_url = format!(
            "https://{HOSTED_DOMAIN_PREFIX}.auth.{}.amazoncognito.com",
            config.region
        );

        template.add_output("UserPoolId", USER_POOL_NAME, "User directory identity")?;
        template.add_output("UserPoolClientId", APP_CLIENT_NAME, "Application client identity")?;
        template.add_output(
            "IdentityDomainUrl",
            hosted_domain_url.clone(),
            "Hosted sign-in domain URL",
        )?;

        tracing::info!(pool = USER_POOL_NAME, "identity provisioned");

        Ok(IdentityHandle {
            pool_id: USER_POOL_NAME.to_string(),
            client_id: APP_CLIENT_NAME.to_string(),
            hosted_domain_url,
        })
    }
}
