use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_api_rest::{router, AppState, DEFAULT_MAX_UPLOAD_BYTES};
use inventory_core::{CoreConfig, InventoryService, DEFAULT_STORE_FILENAME};

/// Command-line options for the inventory server
///
/// `-h` is taken by `--host`, so help is only available as `--help`.
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(about = "Inventory tracking HTTP service", disable_help_flag = true)]
struct Cli {
    /// Server host
    #[arg(short = 'h', long)]
    host: String,
    /// Server port
    #[arg(short = 'p', long)]
    port: u16,
    /// Cache directory for uploaded photos (created if missing)
    #[arg(short = 'c', long)]
    cache: PathBuf,
    /// JSON store file; must already exist
    #[arg(long, default_value = DEFAULT_STORE_FILENAME)]
    store: PathBuf,
    /// Maximum request body size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

/// Main entry point for the inventory service
///
/// Creates the cache directory if needed, then serves the REST API until the process is stopped.
/// The store file is never created here.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the cache directory cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("inventory=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::new(cli.store, cli.cache)?;

    if cfg.ensure_cache_dir()? {
        tracing::info!("Created cache directory {}", cfg.cache_dir().display());
    }
    if !cfg.store_exists() {
        tracing::warn!(
            "Inventory store {} does not exist; requests will fail until it is created",
            cfg.store_path().display()
        );
    }

    let service = InventoryService::from_config(&cfg)?;
    let app = router(AppState::new(service).with_max_upload_bytes(cli.max_upload_bytes));

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    tracing::info!("++ Server running at http://{}:{}", cli.host, cli.port);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_host_port_cache() {
        assert!(Cli::try_parse_from(["inventory"]).is_err());
        assert!(Cli::try_parse_from(["inventory", "-h", "127.0.0.1", "-p", "3000"]).is_err());
        assert!(Cli::try_parse_from(["inventory", "-h", "127.0.0.1", "-c", "cache"]).is_err());
        assert!(Cli::try_parse_from(["inventory", "-p", "3000", "-c", "cache"]).is_err());
    }

    #[test]
    fn test_cli_short_and_long_options() {
        let cli = Cli::try_parse_from(["inventory", "-h", "0.0.0.0", "-p", "8080", "-c", "cache"])
            .unwrap();
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.cache, PathBuf::from("cache"));
        assert_eq!(cli.store, PathBuf::from("inventory.json"));
        assert_eq!(cli.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);

        let cli = Cli::try_parse_from([
            "inventory",
            "--host",
            "localhost",
            "--port",
            "3000",
            "--cache",
            "/tmp/photos",
            "--store",
            "data/items.json",
        ])
        .unwrap();
        assert_eq!(cli.host, "localhost");
        assert_eq!(cli.store, PathBuf::from("data/items.json"));
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        let result = Cli::try_parse_from(["inventory", "-h", "x", "-p", "not-a-port", "-c", "c"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
