// crates/shared-kernel/src/domain/repositories/outbox_repository.rs

use crate::domain::events::DomainEvent;
use crate::domain::transaction::Transaction;
use crate::errors::Result;
use async_trait::async_trait;

/// Port d'écriture de l'outbox (côté commit).
///
/// Discipline d'accès : les transactions métier ne font QUE des insertions
/// via ce port ; les champs processed/claim appartiennent au dispatcher
/// (voir `OutboxStore`).
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    /// Convertit l'événement en ligne d'outbox (identité, horodatage, type,
    /// contenu sérialisé, topic résolu par la politique de routage) et
    /// l'insère SUR LA TRANSACTION DU CALLER : la ligne existe si et
    /// seulement si la transaction métier est commitée.
    async fn save(&self, tx: &mut dyn Transaction, event: &dyn DomainEvent) -> Result<()>;
}
