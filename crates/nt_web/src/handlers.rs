use axum::{extract::State, Json};
use nt_core::{Error, TrendDigest};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TrendRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

pub async fn news_trend(
    State(state): State<AppState>,
    Json(request): Json<TrendRequest>,
) -> Result<Json<TrendDigest>, ApiError> {
    let keyword = request
        .keyword
        .filter(|k| !k.trim().is_empty())
        .ok_or(Error::MissingKeyword)?;

    let digest = state.manager.run(&keyword).await?;
    Ok(Json(digest))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "model": state.manager.model_name() }))
}
