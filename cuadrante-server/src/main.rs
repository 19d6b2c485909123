use cuadrante_server::utils::logger;
use cuadrante_server::{AppState, Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    logger::init_logger(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        "Cuadrante server starting (environment: {})",
        config.environment
    );

    let state = AppState::new(config.clone())?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
