//! Axum route handlers for the Template API.

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::templates::catalog::{
    all_templates, color_variations, template_stats, templates_for_business_type, ColorVariation,
    Template, TemplateId, TemplateStats,
};
use crate::templates::resolver::{explain, BusinessDescriptor, Resolution};
use crate::templates::scorer::{score_description, TemplateMatch};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTemplatesQuery {
    #[serde(default)]
    pub business_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ColorVariationsResponse {
    pub template_id: TemplateId,
    pub variations: &'static [ColorVariation],
}

/// GET /api/v1/templates
///
/// `?businessType=` narrows the catalog to templates whose keywords overlap it.
pub async fn handle_list_templates(
    Query(query): Query<ListTemplatesQuery>,
) -> Json<Vec<&'static Template>> {
    let templates = match query.business_type.as_deref() {
        Some(business_type) => templates_for_business_type(business_type),
        None => all_templates().iter().collect(),
    };
    Json(templates)
}

/// GET /api/v1/templates/stats
pub async fn handle_template_stats() -> Json<TemplateStats> {
    Json(template_stats())
}

/// GET /api/v1/templates/:id/colors
pub async fn handle_color_variations(
    Path(id): Path<String>,
) -> Result<Json<ColorVariationsResponse>, AppError> {
    let template_id = id
        .parse::<TemplateId>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    Ok(Json(ColorVariationsResponse {
        template_id,
        variations: color_variations(template_id),
    }))
}

/// POST /api/v1/templates/suggest
///
/// Scores a free-text description against the catalog.
pub async fn handle_suggest(Json(request): Json<SuggestRequest>) -> Json<TemplateMatch> {
    Json(score_description(request.description.as_deref()))
}

/// POST /api/v1/templates/resolve
///
/// Runs the full resolver and reports every stage.
pub async fn handle_resolve(Json(descriptor): Json<BusinessDescriptor>) -> Json<Resolution> {
    Json(explain(&descriptor))
}
