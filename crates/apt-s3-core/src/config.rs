//! Method configuration pushed by APT.
//!
//! APT forwards its configuration space in a single `601 Configuration`
//! message, one `Config-Item: key=value` field per entry. Only the
//! `Acquire::s3::*` keys matter to this method; everything else is passed
//! over silently so newer APT options never break older methods.

use apt_s3_store::{DEFAULT_REGION, default_endpoint_for};

/// `Config-Item` key selecting the S3 region.
pub const CONFIG_KEY_REGION: &str = "Acquire::s3::region";
/// `Config-Item` key selecting a role ARN to assume.
pub const CONFIG_KEY_ROLE: &str = "Acquire::s3::role";
/// `Config-Item` key overriding the S3 endpoint URL.
pub const CONFIG_KEY_ENDPOINT: &str = "Acquire::s3::endpoint";

/// Process-wide method configuration.
///
/// Built once from the configuration message and published through the
/// engine's configuration cell; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodConfig {
    /// S3 region used for signing and endpoint defaulting.
    pub region: String,
    /// Role ARN to assume when the locator carries no static credentials.
    pub role_arn: Option<String>,
    /// Explicit endpoint override for S3-compatible stores.
    pub endpoint: Option<String>,
}

impl Default for MethodConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_owned(),
            role_arn: None,
            endpoint: None,
        }
    }
}

impl MethodConfig {
    /// Build a configuration from `Config-Item` values.
    ///
    /// Unrecognized keys and items without a `=` separator are ignored.
    #[must_use]
    pub fn from_config_items<'a>(items: impl Iterator<Item = &'a str>) -> Self {
        let mut config = Self::default();
        for item in items {
            let Some((key, value)) = item.split_once('=') else {
                continue;
            };
            match key {
                CONFIG_KEY_REGION => config.region = value.to_owned(),
                CONFIG_KEY_ROLE => config.role_arn = Some(value.to_owned()),
                CONFIG_KEY_ENDPOINT => config.endpoint = Some(value.to_owned()),
                _ => {}
            }
        }
        config
    }

    /// The endpoint URL fetch requests should talk to: the explicit
    /// override if configured, else the region-derived default.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| default_endpoint_for(&self.region))
    }
}
