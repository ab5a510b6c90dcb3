//! Visitor feedback on generated pages.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::feedback::FeedbackRow;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default)]
    pub page_id: Option<Uuid>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

/// Where a submission came from, taken from request headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        Self {
            // First hop is the original client.
            ip_address: header_str(header::HeaderName::from_static("x-forwarded-for"))
                .and_then(|v| v.split(',').next())
                .map(|ip| ip.trim().to_string())
                .filter(|ip| !ip.is_empty()),
            user_agent: header_str(header::USER_AGENT).map(str::to_string),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Rejects out-of-range ratings and normalizes blank text fields to `None`.
pub fn validate_feedback(request: FeedbackRequest) -> Result<FeedbackRequest, AppError> {
    if let Some(rating) = request.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(format!(
                "Rating must be between 1 and 5, got {rating}"
            )));
        }
    }

    Ok(FeedbackRequest {
        comment: non_blank(request.comment),
        user_email: non_blank(request.user_email),
        ..request
    })
}

/// POST /api/v1/feedback
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackRow>), AppError> {
    let request = validate_feedback(request)?;
    let client = ClientInfo::from_headers(&headers);
    // In 1..=5 after validation
    let rating = request.rating.and_then(|r| i16::try_from(r).ok());

    let row = sqlx::query_as::<_, FeedbackRow>(
        r#"
        INSERT INTO feedback (page_id, rating, comment, user_email, ip_address, user_agent)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(request.page_id)
    .bind(rating)
    .bind(&request.comment)
    .bind(&request.user_email)
    .bind(&client.ip_address)
    .bind(&client.user_agent)
    .fetch_one(&state.db)
    .await?;

    info!("Feedback {} recorded (rating: {:?})", row.id, row.rating);
    Ok((StatusCode::CREATED, Json(row)))
}
