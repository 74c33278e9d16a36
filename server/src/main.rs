use comanda_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment: .env, work directory, logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    setup_environment(&config)?;

    tracing::info!("Comanda server starting...");

    // 2. State: database, bus, engines
    let state = ServerState::initialize(&config).await?;

    // 3. HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
