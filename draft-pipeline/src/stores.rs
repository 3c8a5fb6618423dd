use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use common::{
    error::AppError,
    storage::{db::SurrealDbClient, store::StorageManager, types::draft::Draft},
};

/// Blob tier seam. Writes are idempotent: re-putting a location overwrites
/// with no other side effect.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn put(&self, location: &str, content: Bytes) -> Result<(), AppError>;
    async fn get(&self, location: &str) -> Result<Bytes, AppError>;
    async fn exists(&self, location: &str) -> Result<bool, AppError>;
    async fn list(&self, prefix: &str) -> Result<Vec<String>, AppError>;
}

/// Record tier seam. `put_draft` upserts, so retrying the same identifier is
/// safe.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn put_draft(&self, draft: &Draft) -> Result<(), AppError>;
    async fn get_draft(&self, id: &str) -> Result<Option<Draft>, AppError>;
}

pub struct ObjectContentStore {
    storage: StorageManager,
}

impl ObjectContentStore {
    pub fn new(storage: StorageManager) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ContentStore for ObjectContentStore {
    async fn put(&self, location: &str, content: Bytes) -> Result<(), AppError> {
        self.storage.put(location, content).await.map_err(|e| {
            AppError::StorageUnavailable(format!("content write at {location}: {e}"))
        })
    }

    async fn get(&self, location: &str) -> Result<Bytes, AppError> {
        self.storage.get(location).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => AppError::NotFound(location.to_string()),
            other => AppError::StorageUnavailable(format!("content read at {location}: {other}")),
        })
    }

    async fn exists(&self, location: &str) -> Result<bool, AppError> {
        self.storage.exists(location).await.map_err(|e| {
            AppError::StorageUnavailable(format!("content head at {location}: {e}"))
        })
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        self.storage
            .list(Some(prefix))
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("content list at {prefix}: {e}")))
    }
}

pub struct SurrealMetadataStore {
    db: Arc<SurrealDbClient>,
}

impl SurrealMetadataStore {
    pub fn new(db: Arc<SurrealDbClient>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MetadataStore for SurrealMetadataStore {
    async fn put_draft(&self, draft: &Draft) -> Result<(), AppError> {
        self.db
            .upsert_item(draft.clone())
            .await
            .map(|_| ())
            .map_err(|e| {
                AppError::StorageUnavailable(format!("metadata write for {}: {e}", draft.id))
            })
    }

    async fn get_draft(&self, id: &str) -> Result<Option<Draft>, AppError> {
        self.db
            .get_item::<Draft>(id)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("metadata read for {id}: {e}")))
    }
}
