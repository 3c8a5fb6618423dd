use std::sync::Arc;

use api_router::{api_routes_v1, api_state::ApiState};
use axum::{extract::FromRef, Router};
use common::{
    storage::store::StorageManager,
    utils::{config::get_config, secrets::SecretCache},
};
use draft_pipeline::generation::{GenerationClient, OpenAiGenerationApi, RetryPolicy};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    // Get config
    let config = get_config()?;

    let api_key = SecretCache::new(&config.openai_api_key_secret);
    let openai_client = Arc::new(async_openai::Client::with_config(
        async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key.credential().await?)
            .with_api_base(&config.openai_base_url),
    ));

    let generation = GenerationClient::new(
        Arc::new(OpenAiGenerationApi::new(
            openai_client,
            config.generation_model.clone(),
        )),
        RetryPolicy::from_config(&config),
    );

    // Create global storage manager
    let storage = StorageManager::new(&config).await?;
    info!(backend = ?storage.backend_kind(), "Storage manager initialized");

    let api_state = ApiState::new(&config, storage, generation).await?;

    // Create Axum router
    let app = Router::new()
        .nest("/api/v1", api_routes_v1())
        .with_state(AppState { api_state });

    info!("Starting server listening on 0.0.0.0:{}", config.http_port);
    let serve_address = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(serve_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Clone, FromRef)]
struct AppState {
    api_state: ApiState,
}
