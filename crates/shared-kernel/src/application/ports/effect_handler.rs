// crates/shared-kernel/src/application/ports/effect_handler.rs

use async_trait::async_trait;
use crate::domain::events::EventEnvelope;

/// Classification explicite des échecs du handler d'effet.
/// C'est le handler qui sait si la cause peut se résorber toute seule ;
/// le pipeline n'a pas à deviner depuis une exception fourre-tout.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerFailure {
    /// Payload indéchiffrable pour ce type d'événement : dead-letter
    /// InvalidPayload, la charge ne deviendra jamais valide
    Invalid(String),
    /// Timeout réseau, dépendance aval indisponible : à retenter
    Transient(String),
    /// Règle métier violée, état incohérent : dead-letter ProcessingError
    Permanent(String),
}

/// Effet de bord appliqué à la réception d'un événement.
/// L'idempotence est garantie par le registre durable clé par
/// (handler_name, event id), pas par le handler lui-même.
#[async_trait]
pub trait EffectHandler: Send + Sync {
    /// Nom stable du handler : clé du registre d'idempotence
    fn handler_name(&self) -> &'static str;

    async fn apply(&self, envelope: &EventEnvelope) -> Result<(), HandlerFailure>;
}
