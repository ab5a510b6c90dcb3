//! Axum route handlers for the Render API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::generation::generator::find_page_by_slug;
use crate::render::{render_page, RenderedPage};
use crate::state::AppState;

/// GET /api/v1/websites/:slug/page
///
/// Composed sections for the page's resolved template, or the fallback view.
pub async fn handle_render_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RenderedPage>, AppError> {
    let page = find_page_by_slug(&state.db, &slug).await?;
    Ok(Json(render_page(&page)))
}
