use attempt_limiter::{app, config::Args, state::AppState};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // parse cli arguments
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = args.limiter_config()?;
    let state = Arc::new(AppState::new(config));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %addr,
        max_attempts = config.max_attempts,
        min_interval_ms = config.min_interval.as_millis() as u64,
        lockout_ms = config.lockout.as_millis() as u64,
        "Attempt limiter listening"
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}
