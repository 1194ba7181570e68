//! Footprints - command-line access to the FootPrints SOAP API
//!
//! Dispatches a single operation by its wire name and prints the decoded
//! response as JSON on stdout. Logs go to stderr.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `FOOTPRINTS_BASE_URL`: URL of the service description (WSDL)
//! - `FOOTPRINTS_CLIENT_ID`: username for basic authentication
//! - `FOOTPRINTS_CLIENT_SECRET`: password for basic authentication
//!
//! # Usage
//!
//! ```bash
//! footprints getItemId --params '{"item_definition_id": 76, "item_number": "SR-1042"}'
//! footprints listContainerDefinitions
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use footprints::{args, config, Footprints, Operation, Params};

/// Invoke a FootPrints SOAP operation.
#[derive(Debug, Parser)]
#[command(name = "footprints", version, about)]
struct Cli {
    /// Operation wire name, e.g. `getTicketDetails`.
    #[arg(required_unless_present = "list")]
    operation: Option<String>,

    /// Parameters as a JSON object, in snake_case or camelCase.
    #[arg(long, short)]
    params: Option<String>,

    /// List the supported operations and exit.
    #[arg(long, conflicts_with = "params")]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout carries the JSON result, so logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("footprints=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for operation in Operation::ALL {
            println!("{}", operation);
        }
        return Ok(());
    }

    let operation = cli.operation.context("an operation name is required")?;
    let params = parse_params(cli.params.as_deref())?;

    let config = config::Config::from_env().context("Failed to load configuration")?;
    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client = Footprints::connect(&config)
        .await
        .context("Failed to connect to FootPrints")?;

    let response = client
        .request(&operation, params, Params::new())
        .await
        .with_context(|| format!("{} failed", operation))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to render response")?
    );

    Ok(())
}

fn parse_params(raw: Option<&str>) -> Result<Params> {
    let Some(raw) = raw else {
        return Ok(Params::new());
    };
    let value: serde_json::Value =
        serde_json::from_str(raw).context("--params must be a JSON object")?;
    if value.as_object().is_some_and(|map| map.is_empty()) {
        return Ok(Params::new());
    }
    args::cleanup_args(&value).context("Invalid --params")
}
