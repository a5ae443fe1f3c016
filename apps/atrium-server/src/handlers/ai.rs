//! Generative-text handlers: summarization and title generation.
//!
//! Thin passthroughs over [`TextGenerator`]; prompt construction lives
//! in atrium-ai so the wording is testable without a live client.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use atrium_ai::{summarize_prompt, title_prompt};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub keywords: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub text: String,
}

pub async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("text is required".into()))?;

    let summary = state
        .text
        .generate(&summarize_prompt(&text))
        .await
        .map_err(ApiError::upstream)?;

    Ok(Json(SummarizeResponse { summary }))
}

pub async fn title_generate(
    State(state): State<AppState>,
    Json(req): Json<TitleRequest>,
) -> Result<Json<TitleResponse>, ApiError> {
    let keywords = req
        .keywords
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("keywords is required".into()))?;
    let description = req
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("description is required".into()))?;

    let text = state
        .text
        .generate(&title_prompt(&keywords, &description))
        .await
        .map_err(ApiError::upstream)?;

    Ok(Json(TitleResponse { text }))
}
