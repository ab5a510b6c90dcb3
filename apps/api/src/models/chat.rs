use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatSessionRow {
    pub id: Uuid,
    /// Set once the session has produced a website.
    pub page_id: Option<Uuid>,
    pub session_data: Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessageRow {
    pub id: Uuid,
    pub session_id: Uuid,
    /// Insertion order within the session.
    pub seq: i64,
    pub message: String,
    pub is_user: bool,
    pub message_type: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}
