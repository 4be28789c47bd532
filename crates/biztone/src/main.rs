use biztone_common::{logger, AppConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }

    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "biztone")]
#[command(about = "BizTone - Korean business tone converter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Static frontend directory
        #[arg(long)]
        frontend_dir: Option<PathBuf>,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before reading config so CLI overrides apply on top of it
    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    if let Some(Commands::Serve { host, port, frontend_dir }) = cli.command {
        if let Some(host) = host {
            config.server_host = host;
        }
        if let Some(port) = port {
            config.server_port = port;
        }
        if let Some(dir) = frontend_dir {
            config.frontend_dir = dir;
        }
        config.validate()?;
    }

    logger::setup_logging(config.log_dir.as_deref(), &config.log_level)?;

    tracing::info!("BizTone starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model: {}", config.llm_model);
    tracing::info!("  Frontend: {}", config.frontend_dir.display());

    println!("Server listening on http://{}", config.server_bind_address());

    biztone_server::start_server(config).await?;

    Ok(())
}
