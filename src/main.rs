//! azsearch-config: command-line configuration client for Azure AI Search.
//!
//! One invocation resolves the service admin key through the management
//! control plane, performs a single resource operation against the data
//! plane, and prints the result as JSON: stdout on success, stderr plus a
//! non-zero exit on failure.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod auth;
mod client;
mod definition;
mod handlers;
mod print;
mod settings;

use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, info};

use args::{Cli, Commands};
use client::{CliError, SearchClient};

#[tokio::main]
async fn main() {
    let cli = parse_args();

    match run(cli).await {
        Ok(value) => {
            if let Err(err) = print::success(&value) {
                print::failure(&err);
                process::exit(1);
            }
        }
        Err(err) => {
            print::failure(&err);
            process::exit(1);
        }
    }
}

/// Argument errors exit 1 like every other user error; help and version
/// output keep clap's zero exit.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<serde_json::Value, CliError> {
    let settings = settings::load(&cli)?;
    init_tracing(&settings);

    let http = reqwest::Client::builder()
        .user_agent(client::user_agent())
        .build()?;

    let token = auth::acquire_token(&http, &settings).await?;
    let admin_key = auth::resolve_admin_key(&http, &settings, &token).await?;
    debug!("admin key resolved");

    let client = SearchClient::new(http, &settings, admin_key)?;
    info!(endpoint = %client.endpoint(), "search service endpoint resolved");

    match cli.command {
        Commands::Index(cmd) => handlers::indexes::handle(&client, cmd.action).await,
        Commands::Datasource(cmd) => handlers::datasources::handle(&client, cmd.action).await,
        Commands::Indexer(cmd) => handlers::indexers::handle(&client, cmd.action).await,
    }
}

/// Diagnostics go to stderr; stdout carries result JSON only.
fn init_tracing(settings: &settings::Settings) {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(settings.log_level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
