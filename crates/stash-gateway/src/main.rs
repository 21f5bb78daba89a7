//! Stash Gateway - upload/download HTTP gateway over object storage

use clap::Parser;
use stash_gateway::{run_server, GatewayConfig};
use stash_store::{S3ObjectStore, StoreConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stash-gateway")]
#[command(about = "HTTP gateway for object storage upload/download")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "STASH_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "STASH_PORT")]
    port: u16,

    /// Storage backend access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    access_key_id: String,

    /// Storage backend secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: String,

    /// Storage backend region
    #[arg(long, env = "AWS_REGION")]
    region: String,

    /// Storage backend endpoint URL (plain HTTP allowed for local backends)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    endpoint_url: String,

    /// Enable debug logging
    #[arg(short, long, env = "STASH_DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse arguments; missing required settings abort startup here
    let args = Args::parse();

    // Setup logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("stash_gateway={log_level},stash_store={log_level},tower_http=info").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Stash Gateway on {}:{}",
        args.host,
        args.port
    );
    tracing::info!("Storage endpoint: {}", args.endpoint_url);

    let store_config = StoreConfig::from_parts(
        args.access_key_id,
        args.secret_access_key,
        args.region,
        args.endpoint_url,
    );

    // Empty values from the environment are a fatal configuration error
    let store = S3ObjectStore::new(store_config).await?;

    let config = GatewayConfig {
        host: args.host,
        port: args.port,
        ..Default::default()
    };

    run_server(config, Arc::new(store)).await
}
