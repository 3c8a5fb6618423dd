use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use draft_pipeline::{
    orchestrator::{DraftReport, PersistenceOutcome},
    validator::RawGenerationRequest,
};
use serde::Serialize;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError};

/// Wire shape of a finished draft. Partial persistence failures still return
/// this body with a non-success `status` and a `warning`, so the generated
/// content is never lost to the caller.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub id: String,
    pub status: String,
    pub content: String,
    pub preview: String,
    pub metadata: DraftMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftMetadata {
    pub word_count: usize,
    pub character_count: usize,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl From<DraftReport> for DraftResponse {
    fn from(report: DraftReport) -> Self {
        let preview = report.preview().to_string();
        let storage_location = match report.persistence {
            // Nothing was written at the recorded location
            PersistenceOutcome::ContentUnsaved { .. } => None,
            _ => Some(report.draft.storage_location.clone()),
        };

        Self {
            id: report.draft.id,
            status: report.persistence.status_label().to_string(),
            warning: report.persistence.warning(),
            preview,
            content: report.content,
            metadata: DraftMetadata {
                word_count: report.draft.word_count,
                character_count: report.draft.character_count,
                model: report.draft.model,
                input_tokens: report.draft.input_tokens,
                output_tokens: report.draft.output_tokens,
            },
            storage_location,
            created_at: report.draft.created_at,
        }
    }
}

pub async fn create_draft(
    State(state): State<ApiState>,
    Json(input): Json<RawGenerationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt_chars = input.prompt.chars().count();
    info!(prompt_chars, "Received draft generation request");

    let report = state.orchestrator.run(input).await?;
    let response = DraftResponse::from(report);

    info!(
        draft_id = %response.id,
        status = %response.status,
        "Draft generation request finished"
    );

    Ok((StatusCode::OK, Json(response)))
}
