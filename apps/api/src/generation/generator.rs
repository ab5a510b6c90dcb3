//! Website Generation: orchestrates the full generation pipeline.
//!
//! Flow: validate message → analyze business → write copy → slug →
//!       stored template choice → persist page → return response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::generation::analysis::BusinessAnalysis;
use crate::generation::composer::ContentComposer;
use crate::generation::copywriter::GeneratedContent;
use crate::models::page::{PageContent, PageRow};
use crate::templates::catalog::TemplateId;
use crate::templates::matcher::match_business_type;
use crate::templates::resolver::{resolve, BusinessDescriptor};

/// Shorter descriptions are rejected before any LLM call.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Slug base used when the business name has no usable characters.
const FALLBACK_SLUG: &str = "website";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for website generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub user_message: String,
    /// Overrides the configured LLM key for this request only.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// A page ready to insert.
#[derive(Debug, Clone, Serialize)]
pub struct PageDraft {
    pub slug: String,
    pub business_name: String,
    pub industry: Option<String>,
    pub template_id: TemplateId,
    pub content: PageContent,
    pub meta_data: Value,
}

/// Everything the LLM produced for one description, plus the draft built from it.
#[derive(Debug, Clone)]
pub struct DraftOutcome {
    pub draft: PageDraft,
    pub analysis: BusinessAnalysis,
    pub content: GeneratedContent,
}

/// Response from the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedWebsite {
    pub success: bool,
    pub website: PageRow,
    pub analysis: BusinessAnalysis,
    pub content: GeneratedContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Trims the description and enforces the minimum length.
pub fn validate_user_message(user_message: &str) -> Result<&str, AppError> {
    let trimmed = user_message.trim();
    if trimmed.chars().count() < MIN_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "Please provide a more detailed description of your business (at least {MIN_MESSAGE_CHARS} characters)."
        )));
    }
    Ok(trimmed)
}

/// Runs the full generation pipeline and persists the page.
pub async fn generate_website(
    pool: &PgPool,
    composer: &dyn ContentComposer,
    user_message: &str,
) -> Result<GeneratedWebsite, AppError> {
    let user_message = validate_user_message(user_message)?;

    let DraftOutcome {
        draft,
        analysis,
        content,
    } = draft_page(composer, user_message, Utc::now()).await?;

    let website = insert_page(pool, &draft).await?;

    info!(
        "Generated website {} ({}) with template {}",
        website.slug, website.id, website.template_id
    );

    Ok(GeneratedWebsite {
        success: true,
        website,
        analysis,
        content,
    })
}

/// Steps 1–3: analyze, write copy, and assemble the page draft. No persistence.
pub async fn draft_page(
    composer: &dyn ContentComposer,
    user_message: &str,
    now: DateTime<Utc>,
) -> Result<DraftOutcome, AppError> {
    info!("Analyzing business description ({} chars)", user_message.len());
    let analysis = composer.analyze(user_message).await?;
    info!(
        "Business analyzed: name={:?}, type={}, industry={:?}",
        analysis.business_name,
        analysis.business_type.as_str(),
        analysis.industry
    );

    let content = composer.compose(user_message, &analysis).await?;

    let (template_id, template_reasoning) = select_stored_template(&analysis);
    info!("Template selection: {template_reasoning}");

    let page_content = PageContent {
        business_type: Some(analysis.business_type),
        location: Some(analysis.location.clone()),
        tone: Some(analysis.tone),
        services: analysis.services.clone(),
        hero: Some(content.hero.clone()),
        about: Some(content.about.clone()),
        services_list: content.services.clone(),
        contact: Some(content.contact.clone()),
        gallery: None,
        testimonials: Vec::new(),
    };

    let industry = Some(analysis.industry.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string);

    // The renderer resolves its own template; record where it will land.
    let rendered_template = resolve(&BusinessDescriptor::for_page(
        &analysis.business_name,
        industry.as_deref(),
        Some(content.hero.headline.as_str()),
        Some(content.about.as_str()),
    ));
    if rendered_template != template_id {
        info!("Stored template {template_id} will render as {rendered_template}");
    }

    let draft = PageDraft {
        slug: unique_slug(&analysis.business_name, now),
        business_name: analysis.business_name.clone(),
        industry,
        template_id,
        content: page_content,
        meta_data: json!({
            "userMessage": user_message,
            "generatedAt": now.to_rfc3339(),
            "templateReasoning": template_reasoning,
            "renderedTemplate": rendered_template,
        }),
    };

    Ok(DraftOutcome {
        draft,
        analysis,
        content,
    })
}

/// The composer's recommendation when it names a known template,
/// otherwise the business-type matcher over the analysis.
pub fn select_stored_template(analysis: &BusinessAnalysis) -> (TemplateId, String) {
    let recommended = analysis.recommended_template.as_deref().unwrap_or("none");

    let template_id = analysis.recommended_template_id().unwrap_or_else(|| {
        match_business_type(
            Some(analysis.business_type.as_str()),
            Some(analysis.industry.as_str()),
        )
    });

    (
        template_id,
        format!("AI recommended: {recommended}, Final: {template_id}"),
    )
}

/// Lowercases and joins runs of `[a-z0-9]` with single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug suffixed with the creation time in milliseconds.
pub fn unique_slug(business_name: &str, now: DateTime<Utc>) -> String {
    let base = slugify(business_name);
    let base = if base.is_empty() {
        FALLBACK_SLUG
    } else {
        base.as_str()
    };
    format!("{base}-{}", now.timestamp_millis())
}

async fn insert_page(pool: &PgPool, draft: &PageDraft) -> Result<PageRow, AppError> {
    let content = serde_json::to_value(&draft.content)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize page content: {e}")))?;

    let row = sqlx::query_as::<_, PageRow>(
        r#"
        INSERT INTO pages (slug, business_name, industry, template_id, content, meta_data)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&draft.slug)
    .bind(&draft.business_name)
    .bind(&draft.industry)
    .bind(draft.template_id.as_str())
    .bind(&content)
    .bind(&draft.meta_data)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Loads a page by slug.
pub async fn find_page_by_slug(pool: &PgPool, slug: &str) -> Result<PageRow, AppError> {
    sqlx::query_as::<_, PageRow>("SELECT * FROM pages WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Website {slug} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
