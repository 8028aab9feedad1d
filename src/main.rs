//! Command line entry point for the performance engine.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use performance_engine::api::{AppState, create_router};
use performance_engine::config::ConfigLoader;
use performance_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "performance-engine",
    about = "Daily performance points and monthly bonus calculation engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Directory holding company.yaml, policy.yaml and employees.yaml
    #[arg(long, default_value = "./config/acme")]
    config_dir: PathBuf,
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("./config/acme"),
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init(&args.log_level)?;

    let config = ConfigLoader::load(&args.config_dir)?;
    info!(
        company = %config.company().name,
        employees = config.roster().len(),
        config_dir = %args.config_dir.display(),
        "Configuration loaded"
    );

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, create_router(AppState::new(config))).await?;
    Ok(())
}
