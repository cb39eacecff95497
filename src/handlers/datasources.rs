//! Datasource operations. Connection strings are injected into the
//! definition at submit time rather than stored in definition files.

#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use serde_json::{Value, json};

use crate::args::DatasourceCmd;
use crate::client::{CliError, SearchClient};
use crate::definition::Definition;
use crate::handlers::unwrap_value;

const COLLECTION: &str = "datasources";

pub async fn handle(client: &SearchClient, cmd: DatasourceCmd) -> Result<Value, CliError> {
    match cmd {
        DatasourceCmd::List => list(client).await,
        DatasourceCmd::Get { name } => get(client, &name).await,
        DatasourceCmd::Create {
            file,
            update,
            connection_string,
        } => {
            let mut definition = Definition::load(&file)?;
            definition.set_connection_string(&connection_string);
            create(client, &definition, update).await
        }
        DatasourceCmd::Update {
            file,
            connection_string,
        } => {
            let mut definition = Definition::load(&file)?;
            definition.set_connection_string(&connection_string);
            let name = definition.name().to_string();
            put(client, &definition, &name).await
        }
        DatasourceCmd::Delete { name } => delete(client, &name).await,
    }
}

async fn list(client: &SearchClient) -> Result<Value, CliError> {
    let listing = client.submit(Method::GET, COLLECTION, None).await?;
    Ok(unwrap_value(listing))
}

async fn get(client: &SearchClient, name: &str) -> Result<Value, CliError> {
    client
        .submit(Method::GET, &format!("{COLLECTION}/{name}"), None)
        .await
}

async fn delete(client: &SearchClient, name: &str) -> Result<Value, CliError> {
    client
        .submit(Method::DELETE, &format!("{COLLECTION}/{name}"), None)
        .await?;
    Ok(json!({}))
}

/// PUT to an explicit target; the create path passes the name through from
/// its probe rather than re-deriving it.
async fn put(client: &SearchClient, definition: &Definition, name: &str) -> Result<Value, CliError> {
    client
        .submit(
            Method::PUT,
            &format!("{COLLECTION}/{name}"),
            Some(definition.as_value()),
        )
        .await
}

async fn post(client: &SearchClient, definition: &Definition) -> Result<Value, CliError> {
    client
        .submit(Method::POST, COLLECTION, Some(definition.as_value()))
        .await
}

/// Probe-then-update when asked; otherwise a plain POST, with any conflict
/// reported by the remote service.
async fn create(
    client: &SearchClient,
    definition: &Definition,
    update: bool,
) -> Result<Value, CliError> {
    if update && get(client, definition.name()).await.is_ok() {
        return put(client, definition, definition.name()).await;
    }
    post(client, definition).await
}
