use std::sync::Arc;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use rv_core::{ScoredVideo, UserIntent, Video};
use crate::error::{ApiError, Stage};
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordResponse {
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keywords: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub user_input: UserIntent,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub videos: Vec<ScoredVideo>,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn generate_keywords(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserIntent>, JsonRejection>,
) -> Result<Json<KeywordResponse>, ApiError> {
    let Json(intent) = payload.map_err(ApiError::invalid_body)?;
    let intent = intent
        .normalized()
        .map_err(|e| ApiError::stage(Stage::Keywords, e))?;

    let keyword = state
        .keywords
        .generate(&intent)
        .await
        .map_err(|e| ApiError::stage(Stage::Keywords, e))?;
    Ok(Json(KeywordResponse { keyword }))
}

pub async fn search_videos(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::invalid_body)?;

    let videos = state
        .search
        .search(&request.keywords)
        .await
        .map_err(|e| ApiError::stage(Stage::Search, e))?;
    Ok(Json(SearchResponse { videos }))
}

pub async fn score_videos(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::invalid_body)?;
    let intent = request
        .user_input
        .normalized()
        .map_err(|e| ApiError::stage(Stage::Scoring, e))?;

    let videos = state
        .scorer
        .score(&intent, request.videos)
        .await
        .map_err(|e| ApiError::stage(Stage::Scoring, e))?;
    Ok(Json(ScoreResponse { videos }))
}
