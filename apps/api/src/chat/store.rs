use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::transcript::{ChatMessage, MessageType};
use crate::errors::AppError;
use crate::models::chat::{ChatMessageRow, ChatSessionRow};

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        let message_type = row.message_type.parse().unwrap_or_else(|e| {
            warn!("Chat message {} restored as text: {e}", row.id);
            MessageType::Text
        });

        ChatMessage {
            message: row.message,
            is_user: row.is_user,
            message_type,
            metadata: row.metadata,
        }
    }
}

pub async fn create_session(pool: &PgPool) -> Result<ChatSessionRow, AppError> {
    let session =
        sqlx::query_as::<_, ChatSessionRow>("INSERT INTO chat_sessions DEFAULT VALUES RETURNING *")
            .fetch_one(pool)
            .await?;

    info!("Created chat session {}", session.id);
    Ok(session)
}

pub async fn find_session(pool: &PgPool, session_id: Uuid) -> Result<ChatSessionRow, AppError> {
    sqlx::query_as::<_, ChatSessionRow>("SELECT * FROM chat_sessions WHERE id = $1")
        .bind(session_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Chat session {session_id} not found")))
}

/// Messages for a session in insertion order.
pub async fn load_messages(pool: &PgPool, session_id: Uuid) -> Result<Vec<ChatMessageRow>, AppError> {
    let rows = sqlx::query_as::<_, ChatMessageRow>(
        "SELECT * FROM chat_messages WHERE session_id = $1 ORDER BY seq",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Appends messages in order inside one transaction. A `page_id` links the
/// session to that page in the same transaction.
pub async fn append_messages(
    pool: &PgPool,
    session_id: Uuid,
    messages: &[ChatMessage],
    page_id: Option<Uuid>,
) -> Result<Vec<ChatMessageRow>, AppError> {
    let mut tx = pool.begin().await?;
    let mut rows = Vec::with_capacity(messages.len());

    for message in messages {
        let row = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            INSERT INTO chat_messages (session_id, message, is_user, message_type, metadata)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(&message.message)
        .bind(message.is_user)
        .bind(message.message_type.as_str())
        .bind(&message.metadata)
        .fetch_one(&mut *tx)
        .await?;
        rows.push(row);
    }

    sqlx::query(
        "UPDATE chat_sessions SET page_id = COALESCE($2, page_id), updated_at = now() WHERE id = $1",
    )
    .bind(session_id)
    .bind(page_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(rows)
}

/// Deletes every message and unlinks the page. Returns the number of messages removed.
pub async fn clear_session(pool: &PgPool, session_id: Uuid) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM chat_messages WHERE session_id = $1")
        .bind(session_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query(
        "UPDATE chat_sessions SET page_id = NULL, session_data = '{}'::jsonb, updated_at = now() WHERE id = $1",
    )
    .bind(session_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Cleared {deleted} messages from chat session {session_id}");
    Ok(deleted)
}
