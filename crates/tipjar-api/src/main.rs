//! Binary entry point for the tips API server.
//!
//! Reads its settings from the environment (a `.env` file works locally),
//! then hands off to [`tipjar_api::run`].

use tipjar_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("tracing init failed: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration is incomplete");
            std::process::exit(2);
        }
    };

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        addr = %config.api.address(),
        "Booting"
    );

    if let Err(e) = tipjar_api::run(config).await {
        error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}
