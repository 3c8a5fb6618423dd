use api_state::ApiState;
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use routes::{
    generate::create_draft, liveness::live, readiness::ready, retrieve::get_draft,
};

pub mod api_state;
pub mod error;
mod routes;

/// Router for API functionality, version 1
pub fn api_routes_v1<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    // Probe endpoints (for k8s/systemd probes)
    let probes = Router::new()
        .route("/ready", get(ready))
        .route("/live", get(live));

    let drafts = Router::new()
        .route("/drafts", post(create_draft))
        .route("/drafts/{id}", get(get_draft));

    probes.merge(drafts)
}
