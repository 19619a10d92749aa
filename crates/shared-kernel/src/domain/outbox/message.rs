// crates/shared-kernel/src/domain/outbox/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use crate::domain::events::EventEnvelope;
use crate::errors::{DomainError, Result};

/// Ligne de l'outbox telle que le domaine la voit.
///
/// Invariants :
/// - créée uniquement dans la transaction du changement d'état qui a produit
///   l'événement ;
/// - seule mutation autorisée ensuite : `processed` false -> true (une seule
///   fois, jamais de retour en arrière), avec `processed_on` posé au même
///   moment ;
/// - les lignes traitées sont conservées (piste d'audit), la purge est un
///   sujet d'exploitation.
///
/// Les colonnes de bail (claimed_by/claimed_until) restent internes aux
/// stores : elles ne font pas partie du modèle exposé ici.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxMessage {
    /// Identité de l'événement d'origine : sert aussi de clé de message
    /// côté broker (déduplication de bout en bout).
    pub id: Uuid,
    /// Horodatage de l'événement métier : ordre de dispatch FIFO.
    pub occurred_on: DateTime<Utc>,
    /// Tag de schéma, le consommateur choisit son désérialiseur avec.
    pub event_type: String,
    /// Enveloppe sérialisée, opaque pour l'outbox (le schéma appartient au
    /// producteur).
    pub content: Value,
    /// Canal de destination. None = défaut de routage permanent, la ligne
    /// reste visible et alertable, jamais marquée traitée.
    pub topic: Option<String>,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub processed: bool,
    pub processed_on: Option<DateTime<Utc>>,
}

impl OutboxMessage {
    /// Construit une ligne en attente depuis une enveloppe.
    /// Échec de sérialisation = échec du commit entier (fail-closed).
    pub fn pending(envelope: &EventEnvelope, topic: Option<String>) -> Result<Self> {
        let content = serde_json::to_value(envelope)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(Self {
            id: envelope.id,
            occurred_on: envelope.occurred_at,
            event_type: envelope.event_type.clone(),
            content,
            topic,
            attempts: 0,
            last_error: None,
            processed: false,
            processed_on: None,
        })
    }

    /// Corps publié vers le broker : le JSON de l'enveloppe, tel quel.
    pub fn body(&self) -> String {
        self.content.to_string()
    }
}
