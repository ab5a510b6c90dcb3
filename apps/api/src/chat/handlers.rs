//! Axum route handlers for the Chat API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::store::{
    append_messages, clear_session, create_session, find_session, load_messages,
};
use crate::chat::transcript::{ChatMessage, ChatTranscript, FOLLOW_UP_TEXT};
use crate::errors::AppError;
use crate::generation::generator::{generate_website, GeneratedWebsite};
use crate::models::chat::{ChatMessageRow, ChatSessionRow};
use crate::models::page::PageRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session: ChatSessionRow,
    pub messages: Vec<ChatMessageRow>,
    pub website: Option<PageRow>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// Rows written by this request, in order.
    pub messages: Vec<ChatMessageRow>,
    pub website: Option<PageRow>,
}

/// POST /api/v1/chat/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ChatSessionRow>), AppError> {
    let session = create_session(&state.db).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/chat/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state.db, id).await?;
    let messages = load_messages(&state.db, id).await?;

    let website = match session.page_id {
        Some(page_id) => {
            sqlx::query_as::<_, PageRow>("SELECT * FROM pages WHERE id = $1")
                .bind(page_id)
                .fetch_optional(&state.db)
                .await?
        }
        None => None,
    };

    Ok(Json(SessionView {
        session,
        messages,
        website,
    }))
}

/// POST /api/v1/chat/sessions/:id/messages
///
/// Stores the user's message before generation starts, then stores the
/// outcome together with the page link. Generation failures become an
/// `error` message, not an error response.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Message content is required".to_string()));
    }

    find_session(&state.db, id).await?;

    let mut transcript = ChatTranscript::new();
    transcript.push(ChatMessage::user(content));

    let history = load_messages(&state.db, id).await?;
    transcript.restore(history.into_iter().map(ChatMessage::from).collect());
    info!(
        "Chat session {id}: {} messages after restore",
        transcript.messages().len()
    );

    let mut messages = append_messages(&state.db, id, &transcript.take_unsaved(), None).await?;

    let outcome = match state.composer_for(request.api_key.as_deref()) {
        Ok(composer) => generate_website(&state.db, composer.as_ref(), content).await,
        Err(e) => Err(e),
    };

    let website = push_outcome(&mut transcript, outcome);
    if let Some(page) = &website {
        info!("Chat session {id} generated website {}", page.slug);
    }

    let recorded = append_messages(
        &state.db,
        id,
        &transcript.take_unsaved(),
        website.as_ref().map(|page| page.id),
    )
    .await?;
    messages.extend(recorded);

    Ok(Json(SendMessageResponse { messages, website }))
}

/// Adds the assistant's reply to a generation attempt. Returns the new page on success.
fn push_outcome(
    transcript: &mut ChatTranscript,
    outcome: Result<GeneratedWebsite, AppError>,
) -> Option<PageRow> {
    match outcome {
        Ok(generated) => {
            transcript.push(ChatMessage::generation(&generated.website));
            transcript.push(ChatMessage::assistant_text(FOLLOW_UP_TEXT));
            Some(generated.website)
        }
        Err(e) => {
            warn!("Generation failed: {e}");
            transcript.push(ChatMessage::error(&e.user_message()));
            None
        }
    }
}

/// DELETE /api/v1/chat/sessions/:id/messages
pub async fn handle_clear_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    find_session(&state.db, id).await?;
    clear_session(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::transcript::MessageType;

    #[test]
    fn test_send_message_request_accepts_optional_key() {
        let request: SendMessageRequest =
            serde_json::from_str(r#"{"content": "A bakery in Lund", "apiKey": "sk-x"}"#).unwrap();
        assert_eq!(request.content, "A bakery in Lund");
        assert_eq!(request.api_key.as_deref(), Some("sk-x"));

        let request: SendMessageRequest =
            serde_json::from_str(r#"{"content": "A bakery in Lund"}"#).unwrap();
        assert!(request.api_key.is_none());
    }

    #[test]
    fn test_user_message_is_flushed_before_outcome() {
        let mut transcript = ChatTranscript::new();
        transcript.push(ChatMessage::user("A bakery in Lund"));
        transcript.restore(vec![ChatMessage::assistant_text("Hi there")]);

        let first = transcript.take_unsaved();
        assert_eq!(first.len(), 1);
        assert!(first[0].is_user);

        let website = push_outcome(
            &mut transcript,
            Err(AppError::Llm("Invalid JSON response".to_string())),
        );
        assert!(website.is_none());

        let second = transcript.take_unsaved();
        assert_eq!(second.len(), 1);
        assert!(!second[0].is_user);
        assert_eq!(second[0].message_type, MessageType::Error);
        assert!(second[0].message.contains("AI Generation Error: Invalid JSON response"));
        assert_eq!(transcript.messages().len(), 3);
    }
}
