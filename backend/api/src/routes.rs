use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Json, Router,
};
use campaign_core::{CampaignId, CampaignResult, CampaignStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CampaignStore>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api", get(api_description))
        .route("/campaign-list", get(campaign_list))
        .route("/campaign-list/:id", get(campaign))
        .layer(cors)
        .with_state(state)
}

/// Static description of the routes served here.
async fn api_description() -> Json<Value> {
    Json(json!({
        "title": "Campaign API",
        "version": env!("CARGO_PKG_VERSION"),
        "routes": [
            {
                "method": "GET",
                "path": "/campaign-list",
                "description": "All campaigns from the latest snapshot",
                "returns": "array of campaign objects, or {\"error\": code}"
            },
            {
                "method": "GET",
                "path": "/campaign-list/:id",
                "description": "One campaign by id",
                "returns": "campaign object, or {\"error\": code}"
            }
        ]
    }))
}

async fn campaign_list(State(state): State<AppState>) -> Json<Value> {
    Json(body_or_error(state.store.read_list().await))
}

async fn campaign(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let result = match CampaignId::parse(&id) {
        Ok(id) => state.store.read_campaign(&id).await,
        Err(err) => Err(err),
    };
    Json(body_or_error(result))
}

// read failures go back as a 200 with an errno-style body
fn body_or_error(result: CampaignResult<Value>) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!("campaign read failed: {err}");
            json!({ "error": err.code() })
        }
    }
}
