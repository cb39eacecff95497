//! Index operations, including the full create-or-update reconciliation
//! policy with drop-and-recreate fallback.

#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use serde_json::{Value, json};

use crate::args::IndexCmd;
use crate::client::{CliError, RequestError, SearchClient};
use crate::definition::Definition;
use crate::handlers::unwrap_value;

const COLLECTION: &str = "indexes";

pub async fn handle(client: &SearchClient, cmd: IndexCmd) -> Result<Value, CliError> {
    match cmd {
        IndexCmd::List => list(client).await,
        IndexCmd::Get { name } => get(client, &name).await,
        IndexCmd::Create {
            file,
            update,
            force,
        } => {
            let definition = Definition::load(&file)?;
            create(client, &definition, update, force).await
        }
        IndexCmd::Update { file } => {
            let definition = Definition::load(&file)?;
            put(client, &definition).await
        }
        IndexCmd::Delete { name } => delete(client, &name).await,
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

/// Deletion discards the remote body and reports an empty object.
async fn delete(client: &SearchClient, name: &str) -> Result<Value, CliError> {
    client
        .submit(Method::DELETE, &format!("{COLLECTION}/{name}"), None)
        .await?;
    Ok(json!({}))
}

async fn put(client: &SearchClient, definition: &Definition) -> Result<Value, CliError> {
    client
        .submit(
            Method::PUT,
            &format!("{COLLECTION}/{}", definition.name()),
            Some(definition.as_value()),
        )
        .await
}

async fn post(client: &SearchClient, definition: &Definition) -> Result<Value, CliError> {
    client
        .submit(Method::POST, COLLECTION, Some(definition.as_value()))
        .await
}

/// Create-or-update reconciliation: probe for the index, then POST, PUT, or
/// drop-and-recreate depending on the `update`/`force` flags.
async fn create(
    client: &SearchClient,
    definition: &Definition,
    update: bool,
    force: bool,
) -> Result<Value, CliError> {
    let name = definition.name();

    // A failed probe, whether a 404 or a transport fault, is
    // indistinguishable from "not found"; both take the create path.
    if get(client, name).await.is_err() {
        return post(client, definition).await;
    }

    if !update {
        return Err(already_exists());
    }

    match put(client, definition).await {
        Ok(updated) => Ok(updated),
        Err(_) if force => {
            // Drop and re-create; the POST surfaces any residual conflict.
            let _ = delete(client, name).await;
            post(client, definition).await
        }
        Err(err) => Err(err),
    }
}

/// Synthetic conflict produced locally, without another remote call.
fn already_exists() -> CliError {
    CliError::Api(RequestError {
        url: String::new(),
        status_code: 400,
        message: Value::String("The index already exists".to_string()),
    })
}
