use std::sync::Arc;

use ambient_advisor::{
    api::{create_router, AppState, DisplayOptions},
    config::Config,
    events::EventBus,
    services::{
        HttpRecommendationClient, LatestWeather, MotivationPipeline, OutfitPipeline,
        RecommendationClient, UpdateScheduler,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ambient_advisor=info,tower_http=info")),
        )
        .init();

    let config = Arc::new(Config::from_env()?);
    let profile = config.user_profile();
    if profile.is_none() {
        tracing::warn!("User profile not configured, recommendations will use defaults");
    }

    let bus = EventBus::default();
    let state = AppState::new(bus.clone(), DisplayOptions::from(config.as_ref()));
    let client: Arc<dyn RecommendationClient> =
        Arc::new(HttpRecommendationClient::new(config.request_timeout())?);

    let outfit = OutfitPipeline::new(
        Arc::new(LatestWeather::new()),
        profile,
        client.clone(),
        config.outfit_api_endpoint.clone(),
    );
    let motivation = MotivationPipeline::new(
        client,
        config.motivation_api_endpoint.clone(),
        config.motivation_mood.clone(),
    );

    let schedulers = vec![
        UpdateScheduler::new(
            Arc::new(outfit),
            config.outfit_update_interval(),
            &bus,
            state.outfit.clone(),
        )
        .spawn(),
        UpdateScheduler::new(
            Arc::new(motivation),
            config.motivation_update_interval(),
            &bus,
            state.motivation.clone(),
        )
        .spawn(),
    ];

    let app = create_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Display API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    for scheduler in schedulers {
        scheduler.shutdown().await;
    }
    tracing::info!("Shut down cleanly");

    Ok(())
}
