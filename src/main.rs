use anyhow::anyhow;
use env_logger::Env;

use wave_to_txt::{serve, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (for development convenience)
    // Silently ignore if not found - production uses system env vars
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| anyhow!(e))?;
    serve(config).await
}
