// crates/shared-kernel/src/infrastructure/postgres/postgres_outbox_row.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use serde_json::Value;
use crate::domain::outbox::OutboxMessage;

/// Struct privé à l'infrastructure pour le mapping SQLx
#[derive(FromRow)]
pub struct OutboxRow {
    id: Uuid,
    occurred_on: DateTime<Utc>,
    event_type: String,
    content: Value,
    topic: Option<String>,
    attempts: i32,
    last_error: Option<String>,
    processed: bool,
    processed_on: Option<DateTime<Utc>>,
}

impl From<OutboxRow> for OutboxMessage {
    fn from(row: OutboxRow) -> Self {
        Self {
            id: row.id,
            occurred_on: row.occurred_on,
            event_type: row.event_type,
            content: row.content,
            topic: row.topic,
            attempts: row.attempts,
            last_error: row.last_error,
            processed: row.processed,
            processed_on: row.processed_on,
        }
    }
}
