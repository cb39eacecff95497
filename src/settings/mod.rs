//! Configuration layer: typed settings with layered precedence
//! (defaults → config file → environment → CLI flags).

#![deny(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::args::{Cli, ServiceOverrides};

const LOCAL_CONFIG_BASENAME: &str = ".azsearch-config";
const DEFAULT_API_VERSION: &str = "2019-05-06";
const DEFAULT_SEARCH_DOMAIN: &str = "search.windows.net";
const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Fully-resolved invocation settings after precedence resolution and
/// validation. Immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tenant_id: String,
    pub service_principal_id: String,
    pub service_principal_key: String,
    pub subscription: String,
    pub resource_group: String,
    pub search_service_name: String,
    pub api_version: String,
    pub search_domain: String,
    pub endpoint: Option<String>,
    pub authority: String,
    pub management_endpoint: String,
    pub log_level: LevelFilter,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error(
        "no value for `{key}`: supply the CLI flag, the AZSEARCH_ environment \
         variable, or a config file entry"
    )]
    Missing { key: &'static str },
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &Cli) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("AZSEARCH"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSettings {
    pub(crate) tenant_id: Option<String>,
    pub(crate) service_principal_id: Option<String>,
    pub(crate) service_principal_key: Option<String>,
    pub(crate) subscription: Option<String>,
    pub(crate) resource_group: Option<String>,
    pub(crate) search_service_name: Option<String>,
    pub(crate) api_version: Option<String>,
    pub(crate) search_domain: Option<String>,
    pub(crate) endpoint: Option<String>,
    pub(crate) authority: Option<String>,
    pub(crate) management_endpoint: Option<String>,
    pub(crate) log_level: Option<String>,
}

impl RawSettings {
    pub(crate) fn apply_overrides(&mut self, overrides: &ServiceOverrides) {
        if let Some(v) = overrides.tenant_id.as_ref() {
            self.tenant_id = Some(v.clone());
        }
        if let Some(v) = overrides.service_principal_id.as_ref() {
            self.service_principal_id = Some(v.clone());
        }
        if let Some(v) = overrides.service_principal_key.as_ref() {
            self.service_principal_key = Some(v.clone());
        }
        if let Some(v) = overrides.subscription.as_ref() {
            self.subscription = Some(v.clone());
        }
        if let Some(v) = overrides.resource_group.as_ref() {
            self.resource_group = Some(v.clone());
        }
        if let Some(v) = overrides.search_service_name.as_ref() {
            self.search_service_name = Some(v.clone());
        }
        if let Some(v) = overrides.api_version.as_ref() {
            self.api_version = Some(v.clone());
        }
        if let Some(v) = overrides.search_domain.as_ref() {
            self.search_domain = Some(v.clone());
        }
        if let Some(v) = overrides.endpoint.as_ref() {
            self.endpoint = Some(v.clone());
        }
        if let Some(v) = overrides.authority.as_ref() {
            self.authority = Some(v.clone());
        }
        if let Some(v) = overrides.management_endpoint.as_ref() {
            self.management_endpoint = Some(v.clone());
        }
        if let Some(v) = overrides.log_level.as_ref() {
            self.log_level = Some(v.clone());
        }
    }
}

impl Settings {
    pub(crate) fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let log_level = match raw.log_level {
            Some(level) => level
                .parse::<LevelFilter>()
                .map_err(|_| LoadError::invalid("log_level", format!("unknown level `{level}`")))?,
            None => LevelFilter::WARN,
        };

        Ok(Self {
            tenant_id: required(raw.tenant_id, "tenant_id")?,
            service_principal_id: required(raw.service_principal_id, "service_principal_id")?,
            service_principal_key: required(raw.service_principal_key, "service_principal_key")?,
            subscription: required(raw.subscription, "subscription")?,
            resource_group: required(raw.resource_group, "resource_group")?,
            search_service_name: required(raw.search_service_name, "search_service_name")?,
            api_version: raw
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            search_domain: raw
                .search_domain
                .unwrap_or_else(|| DEFAULT_SEARCH_DOMAIN.to_string()),
            endpoint: raw.endpoint,
            authority: base_url(raw.authority, DEFAULT_AUTHORITY),
            management_endpoint: base_url(raw.management_endpoint, DEFAULT_MANAGEMENT_ENDPOINT),
            log_level,
        })
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, LoadError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(LoadError::Missing { key })
}

/// Base URLs are concatenated with path segments later; a trailing slash
/// would produce double separators.
fn base_url(value: Option<String>, default: &str) -> String {
    let url = value.unwrap_or_else(|| default.to_string());
    url.trim_end_matches('/').to_string()
}
