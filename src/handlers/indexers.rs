//! Indexer operations: the common resource surface plus on-demand `run`
//! and execution `status` sub-resources.

#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use serde_json::{Value, json};

use crate::args::IndexerCmd;
use crate::client::{CliError, SearchClient};
use crate::definition::Definition;
use crate::handlers::unwrap_value;

const COLLECTION: &str = "indexers";

pub async fn handle(client: &SearchClient, cmd: IndexerCmd) -> Result<Value, CliError> {
    match cmd {
        IndexerCmd::List => list(client).await,
        IndexerCmd::Get { name } => get(client, &name).await,
        IndexerCmd::Create { file, update } => {
            let definition = Definition::load(&file)?;
            create(client, &definition, update).await
        }
        IndexerCmd::Update { file } => {
            let definition = Definition::load(&file)?;
            let name = definition.name().to_string();
            put(client, &definition, &name).await
        }
        IndexerCmd::Delete { name } => delete(client, &name).await,
        IndexerCmd::Run { name } => run(client, &name).await,
        IndexerCmd::Status { name } => status(client, &name).await,
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

/// Kick off an on-demand run; success has no meaningful body.
async fn run(client: &SearchClient, name: &str) -> Result<Value, CliError> {
    client
        .submit(Method::POST, &format!("{COLLECTION}/{name}/run"), None)
        .await?;
    Ok(json!({}))
}

async fn status(client: &SearchClient, name: &str) -> Result<Value, CliError> {
    client
        .submit(Method::GET, &format!("{COLLECTION}/{name}/status"), None)
        .await
}
