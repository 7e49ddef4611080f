mod app;
mod categories;
mod client;
mod config;
mod controller;
mod error;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // Log to stderr so the alternate screen stays clean; the level comes
    // from config, RUST_LOG still wins when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!("spese_tui={}", config.log_level))
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
