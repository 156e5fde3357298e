//! Provider configuration.
//!
//! The provider block accepts an `endpoint` and a `token`. Both fall back to
//! environment variables, and the endpoint has a hosted default.

use serde::Deserialize;
use url::Url;

use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// Environment variable consulted when `endpoint` is not configured.
pub const ENV_KEY_ENDPOINT: &str = "COOLIFY_ENDPOINT";

/// Environment variable consulted when `token` is not configured.
pub const ENV_KEY_TOKEN: &str = "COOLIFY_TOKEN";

/// Endpoint used when neither the attribute nor the environment sets one.
pub const DEFAULT_COOLIFY_ENDPOINT: &str = "https://app.coolify.io/api/v1";

/// Oldest Coolify release this provider is known to work against.
pub const MIN_COOLIFY_VERSION: &str = "4.0.0-beta.364";

/// Raw provider block as written by the user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API endpoint, e.g. `https://coolify.example.com/api/v1`.
    pub endpoint: Attr<String>,
    /// API token.
    pub token: Attr<String>,
}

/// Configuration after environment fallbacks and checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Base URL every API path is joined onto.
    pub endpoint: Url,
    /// Bearer token.
    pub token: String,
}

impl ProviderConfig {
    /// Parse the provider block from host JSON.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ProviderError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<ResolvedConfig, ProviderError> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with<F>(&self, env: F) -> Result<ResolvedConfig, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match &self.endpoint {
            Attr::Value(v) => v.clone(),
            _ => env(ENV_KEY_ENDPOINT).unwrap_or_else(|| DEFAULT_COOLIFY_ENDPOINT.to_string()),
        };
        if endpoint.is_empty() {
            return Err(ProviderError::validation(
                "endpoint",
                "Failed to configure client",
                "No API Endpoint provided",
            ));
        }
        let endpoint = parse_endpoint(&endpoint)?;

        let token = match &self.token {
            Attr::Value(v) => v.clone(),
            _ => env(ENV_KEY_TOKEN).unwrap_or_default(),
        };
        if token.is_empty() {
            return Err(ProviderError::validation(
                "token",
                "Failed to configure client",
                format!(
                    "No token provided. Set the token attribute or the {} environment variable",
                    ENV_KEY_TOKEN
                ),
            ));
        }
        if !is_valid_token(&token) {
            return Err(ProviderError::validation(
                "token",
                "Failed to configure client",
                "invalid token format",
            ));
        }

        Ok(ResolvedConfig { endpoint, token })
    }
}

/// Parse an endpoint, ensuring a trailing slash so relative joins keep the path.
fn parse_endpoint(raw: &str) -> Result<Url, ProviderError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&with_slash).map_err(|e| {
        ProviderError::validation(
            "endpoint",
            "Failed to configure client",
            format!("Invalid endpoint '{}': {}", raw, e),
        )
    })
}

/// Coolify personal access tokens look like `<id>|<secret>`.
pub fn is_valid_token(token: &str) -> bool {
    match token.split_once('|') {
        Some((id, secret)) => {
            !id.is_empty()
                && id.chars().all(|c| c.is_ascii_digit())
                && !secret.is_empty()
                && secret.chars().all(|c| c.is_ascii_alphanumeric())
        },
        None => false,
    }
}

/// Schema of the provider block.
pub fn provider_schema(token_from_env: bool) -> Schema {
    let token = if token_from_env {
        Attribute::optional_string()
    } else {
        Attribute::required_string()
    };
    Schema::v0()
        .with_description("Manage resources on a self-hosted Coolify instance.")
        .with_attribute(
            "endpoint",
            Attribute::optional_string().with_description(format!(
                "Coolify endpoint. If not set, checks env for `{}`. Default: `{}`.",
                ENV_KEY_ENDPOINT, DEFAULT_COOLIFY_ENDPOINT
            )),
        )
        .with_attribute(
            "token",
            token.with_description(format!(
                "Coolify token. If not set, checks env for `{}`.",
                ENV_KEY_TOKEN
            )),
        )
        .mark_sensitive(&["token"])
}

/// A `major.minor.patch[-beta.N]` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
    /// Beta number, 0 for a stable release.
    pub beta: u64,
}

/// Parse a version string. Unparseable components read as 0.
pub fn parse_version(version: &str) -> Version {
    let version = version.trim().trim_start_matches('v');
    let mut parts = version.splitn(2, '-');
    let core = parts.next().unwrap_or_default();
    let suffix = parts.next();

    let mut numbers = core.split('.').map(|p| p.parse::<u64>().unwrap_or(0));
    let major = numbers.next().unwrap_or(0);
    let minor = numbers.next().unwrap_or(0);
    let patch = numbers.next().unwrap_or(0);

    let beta = suffix
        .and_then(|s| s.strip_prefix("beta."))
        .and_then(|b| b.split('.').next())
        .and_then(|b| b.parse::<u64>().ok())
        .unwrap_or(0);

    Version {
        major,
        minor,
        patch,
        beta,
    }
}

/// Whether `current` satisfies the minimum version `min`.
///
/// A stable release (no beta) is newer than every beta of the same
/// `major.minor.patch`.
pub fn is_version_compatible(current: &str, min: &str) -> bool {
    let c = parse_version(current);
    let m = parse_version(min);

    if c.major != m.major {
        return c.major > m.major;
    }
    if c.minor != m.minor {
        return c.minor > m.minor;
    }
    if c.patch != m.patch {
        return c.patch > m.patch;
    }
    if c.beta == 0 || m.beta == 0 {
        return c.beta == 0;
    }
    c.beta >= m.beta
}
