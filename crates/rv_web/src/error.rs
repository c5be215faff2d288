use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Keywords,
    Search,
    Scoring,
}

impl Stage {
    pub fn failure_message(self) -> &'static str {
        match self {
            Stage::Keywords => "keyword generation failed",
            Stage::Search => "video search failed",
            Stage::Scoring => "video scoring failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// What a handler reports to the caller. Upstream detail is logged, never returned.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{stage}")]
    Stage {
        stage: Stage,
        #[source]
        source: rv_core::Error,
    },
}

impl ApiError {
    pub fn invalid_body(rejection: impl fmt::Display) -> Self {
        tracing::warn!("Rejected request body: {}", rejection);
        ApiError::BadRequest("invalid request body".to_string())
    }

    pub fn stage(stage: Stage, source: rv_core::Error) -> Self {
        match source {
            rv_core::Error::InvalidInput(message) => ApiError::BadRequest(message),
            source => {
                tracing::error!("❌ {}: {}", stage, source);
                ApiError::Stage { stage, source }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Stage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
