use std::process::ExitCode;

use tracing::{error, info};

use aloion::config::LoggingConfig;
use aloion::{Config, Database, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging, falling back to stdout only
    if let Err(e) = aloion::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        let console = LoggingConfig {
            file: None,
            ..config.logging.clone()
        };
        if let Err(e) = aloion::logging::init(&console) {
            eprintln!("Console logging unavailable: {e}");
        }
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> aloion::Result<()> {
    info!("Aloion starting");

    let db = Database::open(&config.database.path).await?;
    info!("Database opened at {}", config.database.path);

    let server = WebServer::new(&config.server, &config.auth, db)?;
    server.run().await?;
    Ok(())
}
