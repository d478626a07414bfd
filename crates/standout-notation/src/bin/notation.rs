//! notation - parse a query string against a types config and print the
//! resulting clause values.
//!
//! Run with: cargo run --bin notation -- --config types.yaml 'amount=[1,3]&order_by=-amount'

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use standout_notation::{NotationConfig, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(ClapParser, Debug)]
#[command(name = "notation", version, about = "Parse query notation into typed clauses")]
struct Args {
    /// Config file (JSON or YAML) declaring field types and reserved names
    #[arg(short, long)]
    config: PathBuf,

    /// Override the ordering parameter name
    #[arg(long)]
    order_by: Option<String>,

    /// Override the limit parameter name
    #[arg(long)]
    limit: Option<String>,

    /// Override the offset parameter name
    #[arg(long)]
    offset: Option<String>,

    /// Print human-readable clauses instead of JSON lines
    #[arg(long)]
    pretty: bool,

    /// Query text, e.g. `amount=[1,3]&name=~~bob`
    query: String,
}

/// `RUST_LOG` when set and valid, `warn` otherwise.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = NotationConfig::from_path(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    let mut schema = config.schema;
    if let Some(name) = args.order_by {
        schema = schema.with_order_by(name);
    }
    if let Some(name) = args.limit {
        schema = schema.with_limit(name);
    }
    if let Some(name) = args.offset {
        schema = schema.with_offset(name);
    }
    tracing::debug!(?schema, fields = config.types.len(), "config loaded");

    let parser = Parser::new().with_schema(schema);
    for param in parser.parse(args.query.as_str(), &config.types) {
        let param = param?;
        if args.pretty {
            println!("{}", param);
        } else {
            println!("{}", serde_json::to_string(&param)?);
        }
    }

    Ok(())
}
