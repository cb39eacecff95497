//! Service-principal credential exchange and admin key resolution against
//! the management control plane. Both calls are single-attempt and fatal on
//! failure; the data plane is never contacted without a resolved key.

#![deny(clippy::all, clippy::pedantic)]

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::client::CliError;
use crate::settings::Settings;

const MANAGEMENT_API_VERSION: &str = "2020-08-01";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdminKeysResponse {
    primary_key: String,
}

/// Exchange tenant/client/secret for a management-plane bearer token.
pub async fn acquire_token(http: &Client, settings: &Settings) -> Result<String, CliError> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        settings.authority, settings.tenant_id
    );
    let scope = format!("{}/.default", settings.management_endpoint);
    debug!(%url, "requesting service principal token");

    let response = http
        .post(url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", settings.service_principal_id.as_str()),
            ("client_secret", settings.service_principal_key.as_str()),
            ("scope", scope.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::Credential(format!("status {status}: {body}")));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| CliError::Credential(format!("malformed token response: {e}")))?;
    Ok(token.access_token)
}

/// Fetch the primary admin key for the target service instance. The
/// secondary key is never used.
pub async fn resolve_admin_key(
    http: &Client,
    settings: &Settings,
    token: &str,
) -> Result<String, CliError> {
    let url = format!(
        "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Search/searchServices/{}/listAdminKeys",
        settings.management_endpoint,
        settings.subscription,
        settings.resource_group,
        settings.search_service_name
    );
    debug!(%url, "resolving admin key");

    let response = http
        .post(url)
        .query(&[("api-version", MANAGEMENT_API_VERSION)])
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::AdminKey(format!("status {status}: {body}")));
    }

    let keys: AdminKeysResponse = response
        .json()
        .await
        .map_err(|e| CliError::AdminKey(format!("malformed key listing: {e}")))?;
    Ok(keys.primary_key)
}
