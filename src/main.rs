use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parlay_engine::api::health::HealthState;
use parlay_engine::api::latency::LatencyStats;
use parlay_engine::api::routes::{router, ApiState};
use parlay_engine::config::Config;
use parlay_engine::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&cfg);

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(cfg: &Config) {
    let filter = EnvFilter::new(&cfg.log_level);
    match cfg.log_format.as_str() {
        "json" => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn run(cfg: Config) -> Result<()> {
    let api_state = ApiState {
        health: Arc::new(HealthState::new()),
        latency: Arc::new(LatencyStats::new()?),
        max_legs: cfg.max_legs,
    };
    let app = router(api_state);

    let bind_addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Parlay API listening on {bind_addr} (max_legs={})", cfg.max_legs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Parlay API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
