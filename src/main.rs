use agentnet::{create_router, AgentRoster, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    agentnet::init_logger();

    let config = ServerConfig::from_env();

    log::info!("initializing agents...");
    let roster = AgentRoster::from_env();

    let app = create_router(AppState::new(roster));

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    log::info!("agentnet server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
