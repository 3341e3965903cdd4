// src/handlers/content.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::{catalog::Catalog, error::AppError, models::content::SurveyContent};

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
    pub default: String,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    /// Language actually served; differs from the request on fallback.
    pub language: String,
    pub content: SurveyContent,
}

/// Lists the language codes the catalog can serve.
pub async fn list_languages(
    State(catalog): State<Arc<Catalog>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(LanguagesResponse {
        languages: catalog.languages(),
        default: catalog.default_language().to_string(),
    }))
}

/// Returns the full content table for a language.
/// Unsupported codes get the default language.
pub async fn get_content(
    State(catalog): State<Arc<Catalog>>,
    Path(language): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (served, content) = catalog.content(&language);

    Ok(Json(ContentResponse {
        language: served.to_string(),
        content: content.as_ref().clone(),
    }))
}
