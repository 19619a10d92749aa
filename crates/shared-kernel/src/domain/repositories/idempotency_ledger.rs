// crates/shared-kernel/src/domain/repositories/idempotency_ledger.rs

use async_trait::async_trait;
use uuid::Uuid;
use crate::errors::Result;

/// Registre durable des effets déjà appliqués, clé = (handler, event id).
///
/// La coordination d'idempotence est EXTERNALISÉE : les consommateurs
/// tournent en parallèle sur plusieurs instances sans état partagé en
/// mémoire, seul ce registre fait foi. Une relivraison du même message se
/// termine par un acquittement sans ré-appliquer l'effet.
#[async_trait]
pub trait IdempotencyLedger: Send + Sync {
    async fn already_applied(&self, handler: &str, event_id: Uuid) -> Result<bool>;

    /// Enregistre l'application de l'effet. Doit tolérer le doublon
    /// (INSERT ... ON CONFLICT DO NOTHING côté Postgres).
    async fn record_applied(&self, handler: &str, event_id: Uuid) -> Result<()>;
}
