use clap::Parser;
use court_scout::utils::logger;
use court_scout::{api, AppConfig, CliConfig, HttpFeed, SearchEngine};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose);
    tracing::info!("Starting court-scout");

    let config = match AppConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration load failed: {}", e);
            eprintln!("❌ could not load '{}': {}", cli.config, e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        venues = config.venues.len(),
        feed = %config.feed.endpoint,
        "configuration loaded"
    );

    let source = Arc::new(HttpFeed::new(&config.feed));
    let engine = Arc::new(SearchEngine::new(&config, source));
    let app = api::router(engine);

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    tracing::info!("listening on http://{}", cli.bind);
    println!("✅ court-scout listening on http://{}", cli.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
