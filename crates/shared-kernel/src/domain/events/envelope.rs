// crates/shared-kernel/src/domain/events/envelope.rs

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;
use crate::domain::events::DomainEvent;

/// Schéma de transport d'un événement : c'est cette structure, sérialisée en
/// JSON UTF-8, qui est stockée dans la colonne `content` de l'outbox puis
/// publiée telle quelle comme corps de message. Le consommateur choisit son
/// désérialiseur de payload d'après `event_type`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
    pub occurred_at: DateTime<Utc>,
    pub metadata: Option<Value>,
}

impl EventEnvelope {
    pub fn wrap(event: &dyn DomainEvent) -> Self {
        Self {
            id: event.event_id(),
            aggregate_type: event.aggregate_type().into_owned(),
            aggregate_id: event.aggregate_id(),
            event_type: event.event_type().into_owned(),
            payload: event.payload(),
            occurred_at: event.occurred_at(),
            // Utilise l'ID de corrélation s'il existe
            metadata: event.correlation_id().map(|id| serde_json::json!({ "correlation_id": id })),
        }
    }
}
