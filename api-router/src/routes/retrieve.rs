use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{api_state::ApiState, error::ApiError, routes::generate::DraftResponse};

pub async fn get_draft(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.orchestrator.retrieve(&id).await?;
    Ok((StatusCode::OK, Json(DraftResponse::from(report))))
}
