use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use symbiosis_common::{logger, AppConfig};

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
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "symbiosis")]
#[command(about = "Symbiosis - topic-scoped RAG backend over space biology publications", long_about = None)]
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

        /// Topic → reference ids JSON file
        #[arg(long)]
        topics: Option<PathBuf>,

        /// Article coordinates JSON file
        #[arg(long)]
        coords: Option<PathBuf>,

        /// Return the model's classification verbatim
        #[arg(long)]
        raw_topics: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    if let Some(Commands::Serve { host, port, topics, coords, raw_topics }) = cli.command {
        // Override with CLI arguments
        if let Some(host) = host {
            config.server_host = host;
        }
        if let Some(port) = port {
            config.server_port = port;
        }
        if let Some(topics) = topics {
            config.topics_path = topics;
        }
        if let Some(coords) = coords {
            config.coords_path = coords;
        }
        if raw_topics {
            config.strict_topics = false;
        }
    }

    config.validate()?;

    if let Err(e) = logger::setup_logging(&config.log_dir, &config.log_level) {
        eprintln!("File logging unavailable ({}), logging to console only", e);
        logger::setup_console_logging(&config.log_level)?;
    }

    tracing::info!("Symbiosis starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Topics: {}", config.topics_path.display());
    tracing::info!("  Coordinates: {}", config.coords_path.display());
    tracing::info!("  Model: {}", config.gemini_model);

    println!("Server listening on http://{}", config.server_bind_address());

    symbiosis_server::start_server(config).await?;

    Ok(())
}
