// crates/shared-kernel/src/application/ports/message_producer.rs

use crate::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait MessageProducer: Send + Sync {
    /// Publie un message vers le bus.
    ///
    /// `message_id` est l'id de la ligne d'outbox : il doit être préservé de
    /// bout en bout (clé de message côté broker) pour permettre la
    /// déduplication à la livraison. Le résultat est non ambigu : Ok =
    /// publié, Err = non publié, pas d'état partiel. L'appel porte un
    /// timeout borné, un dépassement est un échec de publication.
    async fn publish(
        &self,
        topic: &str,
        message_id: Uuid,
        body: &[u8],
        content_type: &str,
    ) -> AppResult<()>;
}
