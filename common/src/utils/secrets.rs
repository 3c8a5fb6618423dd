use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::AppError;

/// Process-lifetime cache for a single named credential.
///
/// The credential is resolved lazily on first use and never re-read; a
/// process restart is the only invalidation. Passed explicitly into whatever
/// client needs it rather than living in ambient global state.
pub struct SecretCache {
    name: String,
    value: OnceCell<String>,
}

impl SecretCache {
    /// Cache that resolves the named environment variable on first access.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: OnceCell::new(),
        }
    }

    /// Cache pre-populated with a known value. Used by tests and by
    /// deployments that inject the credential through the config file.
    pub fn seeded(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: OnceCell::from(value.into()),
        }
    }

    pub fn secret_name(&self) -> &str {
        &self.name
    }

    pub async fn credential(&self) -> Result<&str, AppError> {
        let value = self
            .value
            .get_or_try_init(|| async {
                debug!(secret = %self.name, "Resolving credential from environment");
                std::env::var(&self.name).map_err(|_| {
                    AppError::InternalError(format!(
                        "credential '{}' is not set in the environment",
                        self.name
                    ))
                })
            })
            .await?;

        Ok(value.as_str())
    }
}
