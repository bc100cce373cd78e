//! dynq - a simple DynamoDB client that just works.
//!
//! Fetches one item by primary key and prints it, either as `field=value`
//! lines or as one line of JSON.
//!
//! # Usage
//!
//! ```text
//! dynq --table-name deployment --key-value environment=gozer-dev
//! dynq --output-json --table-name deployment --query '{"environment":{"S":"gozer-dev"}}'
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `0` | item found and printed |
//! | `1` | item not found, or the request failed |
//! | `2` | missing or malformed arguments |
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` | *(unset)* | Static credentials |
//! | `AWS_REGION` | `us-east-1` | Region |
//! | `AWS_ENDPOINT_URL` | *(unset)* | Custom endpoint |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `DYNQ_DEBUG` | `false` | Debug logging for dynq and the AWS SDK. Only `1`, `true`, `TRUE`, `yes`, `YES` enable it; other values count as off |

mod args;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dynq_client::DynamoDbItemClient;
use dynq_core::{DynqEnv, QueryPipeline};

use crate::args::Args;

/// Version reported by the banner.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise the filter derived from `LOG_LEVEL`,
/// `DYNQ_DEBUG` and `--verbose`.
fn init_tracing(env: &DynqEnv, verbose: bool) -> Result<()> {
    let filter = if env.rust_log {
        EnvFilter::from_default_env()
    } else {
        let directive = env.log_filter(verbose);
        EnvFilter::try_new(&directive)
            .with_context(|| format!("invalid log level filter: {directive}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_tracing(&DynqEnv::from_env(), args.verbose)?;

    if args.verbose {
        eprintln!("dynq - {VERSION} - a simple DynamoDB client that just works");
    }

    let connection = args.connection_config();
    let query = args.query_config();
    info!(
        table = %query.table_name,
        region = %connection.region,
        output = ?query.render_mode,
        "starting dynq",
    );

    let client = DynamoDbItemClient::connect(&connection).await;
    let pipeline = QueryPipeline::new(client);
    let status = pipeline
        .run(&query, &mut io::stdout(), &mut io::stderr())
        .await;

    Ok(status.into())
}
