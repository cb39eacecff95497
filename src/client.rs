//! Request dispatcher for the search data plane: one HTTPS request per
//! operation with the admin key and `api-version` attached, responses
//! classified into a JSON payload or a structured [`RequestError`].

#![deny(clippy::all, clippy::pedantic)]

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::settings::{LoadError, Settings};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Settings(#[from] LoadError),
    #[error("failed to read definition file {path}: {source}")]
    DefinitionFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("credential exchange failed: {0}")]
    Credential(String),
    #[error("admin key resolution failed: {0}")]
    AdminKey(String),
    #[error("failed to render output: {0}")]
    Render(String),
    #[error("search service returned status {}", .0.status_code)]
    Api(RequestError),
}

/// Structured remote failure: the request URL, the HTTP status, and the
/// response body parsed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RequestError {
    pub url: String,
    pub status_code: u16,
    pub message: Value,
}

impl CliError {
    /// JSON rendering for stderr. Remote errors print their structured form
    /// verbatim; everything else collapses to a single `error` field.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Api(err) => json!({
                "url": err.url,
                "status_code": err.status_code,
                "message": err.message,
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

pub fn user_agent() -> &'static str {
    concat!("azsearch-config/", env!("CARGO_PKG_VERSION"))
}

/// Data-plane client bound to one service endpoint and admin key for the
/// lifetime of the invocation.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base: Url,
    api_version: String,
    admin_key: String,
}

impl SearchClient {
    pub fn new(client: Client, settings: &Settings, admin_key: String) -> Result<Self, CliError> {
        let base = match settings.endpoint.as_ref() {
            Some(endpoint) => Url::parse(endpoint)?.join("/")?,
            None => Url::parse(&format!(
                "https://{}.{}/",
                settings.search_service_name, settings.search_domain
            ))?,
        };
        Ok(Self::with_base(
            client,
            base,
            settings.api_version.clone(),
            admin_key,
        ))
    }

    /// Bind to an explicit base URL; `new` resolves the URL from settings.
    pub fn with_base(client: Client, base: Url, api_version: String, admin_key: String) -> Self {
        Self {
            client,
            base,
            api_version,
            admin_key,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, CliError> {
        let mut url = self.base.join(path)?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    /// Issue exactly one request; no retry, no backoff. A non-2xx response
    /// becomes the error half of the result, with the body parsed as JSON.
    /// An empty success body parses as JSON `null`.
    pub async fn submit(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, CliError> {
        let url = self.url(path)?;
        debug!(%method, %url, "submitting request");

        let mut request = self
            .client
            .request(method, url.clone())
            .header("api-key", self.admin_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%status, body_bytes = bytes.len(), "response received");

        if !status.is_success() {
            return Err(CliError::Api(RequestError {
                url: url.to_string(),
                status_code: status.as_u16(),
                message: parse_body(&bytes),
            }));
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(parse_body(&bytes))
    }
}

/// Bodies are JSON on the happy path, but error bodies occasionally arrive
/// as plain text; those survive as a JSON string.
fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
