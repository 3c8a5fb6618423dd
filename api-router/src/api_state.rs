use std::sync::Arc;

use common::{
    storage::{db::SurrealDbClient, store::StorageManager},
    utils::config::AppConfig,
};
use draft_pipeline::{
    generation::GenerationClient,
    orchestrator::{DraftOrchestrator, OrchestratorSettings},
    stores::{ObjectContentStore, SurrealMetadataStore},
};

#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<SurrealDbClient>,
    pub config: AppConfig,
    pub storage: StorageManager,
    pub orchestrator: Arc<DraftOrchestrator>,
}

impl ApiState {
    pub async fn new(
        config: &AppConfig,
        storage: StorageManager,
        generation: GenerationClient,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let surreal_db_client = Arc::new(
            SurrealDbClient::new(
                &config.surrealdb_address,
                &config.surrealdb_username,
                &config.surrealdb_password,
                &config.surrealdb_namespace,
                &config.surrealdb_database,
            )
            .await?,
        );

        surreal_db_client.ensure_initialized().await?;

        Ok(Self::with_db(
            config,
            surreal_db_client,
            storage,
            generation,
        ))
    }

    /// Assemble state around an existing database handle. Tests use this with
    /// an in-memory client.
    pub fn with_db(
        config: &AppConfig,
        db: Arc<SurrealDbClient>,
        storage: StorageManager,
        generation: GenerationClient,
    ) -> Self {
        let orchestrator = Arc::new(DraftOrchestrator::new(
            generation,
            Arc::new(ObjectContentStore::new(storage.clone())),
            Arc::new(SurrealMetadataStore::new(Arc::clone(&db))),
            OrchestratorSettings::from_config(config),
        ));

        Self {
            db,
            config: config.clone(),
            storage,
            orchestrator,
        }
    }
}
