//! Command-line surface for `azsearch-config`.
//! Connection parameters are overrides on top of the layered configuration;
//! the subcommand tree mirrors the three manageable resource kinds.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "azsearch-config",
    version,
    about = "Configure Azure AI Search indexes, datasources, and indexers",
    long_about = None
)]
pub struct Cli {
    /// Optional path to a configuration file (TOML or JSON).
    #[arg(
        long = "config-file",
        short = 'c',
        env = "AZSEARCH_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ServiceOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection overrides. Every value can also come from an `AZSEARCH_*`
/// environment variable or the configuration file; flags win.
#[derive(Args, Debug, Default, Clone)]
pub struct ServiceOverrides {
    /// The tenant ID
    #[arg(long = "tenant-id", value_name = "ID", global = true)]
    pub tenant_id: Option<String>,

    /// The client (service principal) ID
    #[arg(long = "service-principal-id", value_name = "ID", global = true)]
    pub service_principal_id: Option<String>,

    /// The client (service principal) password
    #[arg(long = "service-principal-key", value_name = "SECRET", global = true)]
    pub service_principal_key: Option<String>,

    /// The subscription housing the search service
    #[arg(long, value_name = "ID", global = true)]
    pub subscription: Option<String>,

    /// The resource group housing the search service
    #[arg(long = "resource-group", value_name = "NAME", global = true)]
    pub resource_group: Option<String>,

    /// The name of the search service
    #[arg(long = "search-service-name", value_name = "NAME", global = true)]
    pub search_service_name: Option<String>,

    /// Data-plane API version sent with every request
    #[arg(long = "api-version", value_name = "VERSION", global = true)]
    pub api_version: Option<String>,

    /// DNS domain of the search data plane, for sovereign clouds
    #[arg(long = "search-domain", value_name = "DOMAIN", global = true)]
    pub search_domain: Option<String>,

    /// Full data-plane endpoint URL, replacing the name/domain construction
    #[arg(long, value_name = "URL", global = true, hide = true)]
    pub endpoint: Option<String>,

    /// Identity authority base URL
    #[arg(long, value_name = "URL", global = true, hide = true)]
    pub authority: Option<String>,

    /// Management control-plane base URL
    #[arg(
        long = "management-endpoint",
        value_name = "URL",
        global = true,
        hide = true
    )]
    pub management_endpoint: Option<String>,

    /// Base log level (trace|debug|info|warn|error)
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search index configuration
    Index(IndexArgs),
    /// Datasource configuration
    Datasource(DatasourceArgs),
    /// Indexer configuration
    Indexer(IndexerArgs),
}

#[derive(Parser, Debug)]
pub struct IndexArgs {
    #[command(subcommand)]
    pub action: IndexCmd,
}

#[derive(Subcommand, Debug)]
pub enum IndexCmd {
    /// List all indexes
    List,
    /// Get an index
    Get { name: String },
    /// Create an index
    Create {
        /// The index definition
        #[arg(long)]
        file: PathBuf,
        /// Will attempt an update if the index exists
        #[arg(long, default_value_t = false)]
        update: bool,
        /// Will force an existing index to be dropped and re-created if it
        /// can't be updated
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Update an index
    Update {
        /// The index definition
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete an index
    Delete { name: String },
}

#[derive(Parser, Debug)]
pub struct DatasourceArgs {
    #[command(subcommand)]
    pub action: DatasourceCmd,
}

#[derive(Subcommand, Debug)]
pub enum DatasourceCmd {
    /// List all datasources
    List,
    /// Get a datasource
    Get { name: String },
    /// Create a datasource
    Create {
        /// The datasource definition
        #[arg(long)]
        file: PathBuf,
        /// Will attempt an update if the datasource exists
        #[arg(long, default_value_t = false)]
        update: bool,
        /// The connection string used by the datasource
        #[arg(long = "connection-string", env = "AZSEARCH_CONNECTION_STRING")]
        connection_string: String,
    },
    /// Update a datasource
    Update {
        /// The datasource definition
        #[arg(long)]
        file: PathBuf,
        /// The connection string used by the datasource
        #[arg(long = "connection-string", env = "AZSEARCH_CONNECTION_STRING")]
        connection_string: String,
    },
    /// Delete a datasource
    Delete { name: String },
}

#[derive(Parser, Debug)]
pub struct IndexerArgs {
    #[command(subcommand)]
    pub action: IndexerCmd,
}

#[derive(Subcommand, Debug)]
pub enum IndexerCmd {
    /// List all indexers
    List,
    /// Get an indexer
    Get { name: String },
    /// Create an indexer
    Create {
        /// The indexer definition
        #[arg(long)]
        file: PathBuf,
        /// Will attempt an update if the indexer exists
        #[arg(long, default_value_t = false)]
        update: bool,
    },
    /// Update an indexer
    Update {
        /// The indexer definition
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete an indexer
    Delete { name: String },
    /// Run an indexer
    Run { name: String },
    /// Get the status of an indexer
    Status { name: String },
}
