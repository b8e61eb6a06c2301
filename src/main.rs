use clap::Parser;
use osint_lookup::utils::logger;
use osint_lookup::{router, AppState, CliConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if config.logging.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting osint-lookup");
    match &cli.config {
        Some(path) => tracing::info!("📄 Loaded configuration from {}", path.display()),
        None => tracing::info!("📄 No configuration file given, using defaults"),
    }
    if cli.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
