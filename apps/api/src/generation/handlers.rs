//! Axum route handlers for the Website API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::generation::generator::{
    find_page_by_slug, generate_website, validate_user_message, GenerateRequest,
    GeneratedWebsite,
};
use crate::models::page::PageRow;
use crate::state::AppState;

/// POST /api/v1/websites/generate
///
/// Full pipeline: analyze → write copy → choose template → persist.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedWebsite>, AppError> {
    validate_user_message(&request.user_message)?;
    let composer = state.composer_for(request.api_key.as_deref())?;

    let response = generate_website(&state.db, composer.as_ref(), &request.user_message).await?;

    Ok(Json(response))
}

/// GET /api/v1/websites/:slug
pub async fn handle_get_website(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PageRow>, AppError> {
    Ok(Json(find_page_by_slug(&state.db, &slug).await?))
}
