use profile_dashboard::config::Config;
use profile_dashboard::infrastructures::adapters::primary::web::{AppState, create_router};
use profile_dashboard::infrastructures::adapters::secondary::external_apis::github::GitHubApiAdapter;
use profile_dashboard::telemetry;
use std::sync::Arc;
use tracing::{info, info_span};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let provider = telemetry::init(&config)?;

    let initialize_span = info_span!("initialize");
    let entered = initialize_span.enter();
    info!("Application starting for user {}", config.username);

    // Build dependencies
    let github_api_adapter = Arc::new(GitHubApiAdapter::new(config.github_api_url.clone()));
    let app_state = Arc::new(AppState::new(github_api_adapter, config.username.clone()));

    // Create router
    let app = create_router(app_state);

    // Start server
    info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    drop(entered);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutting down");
        })
        .await?;

    if let Some(provider) = provider {
        provider
            .shutdown()
            .map_err(|e| anyhow::anyhow!("Failed to flush spans: {}", e))?;
    }

    Ok(())
}
