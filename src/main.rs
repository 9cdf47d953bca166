use credential_rotator::{
    observability::init_observability, Config, Result, Server, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = Config::from_env()?;
    init_observability(&config.observability)?;

    info!(
        app_name = APP_NAME,
        version = VERSION,
        api_address = %config.api.socket_address(),
        vault_address = %config.vault.address,
        directory_url = %config.directory.base_url,
        metrics_enabled = config.observability.enable_metrics,
        "Loaded configuration from environment"
    );

    let server = Server::new(config).await?;
    server.run().await
}
