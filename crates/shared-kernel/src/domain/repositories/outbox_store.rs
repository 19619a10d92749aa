// crates/shared-kernel/src/domain/repositories/outbox_store.rs

use std::time::Duration;
use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::outbox::OutboxMessage;
use crate::errors::Result;

/// Lignes en attente qui ne progresseront plus sans intervention : à
/// remonter en alerte d'exploitation, jamais à ignorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StuckSummary {
    /// topic NULL : défaut de routage permanent
    pub unroutable: u64,
    /// plafond de tentatives atteint
    pub exhausted: u64,
}

impl StuckSummary {
    pub fn is_empty(&self) -> bool {
        self.unroutable == 0 && self.exhausted == 0
    }
}

/// Port de lecture/avancement de l'outbox (côté dispatcher).
///
/// Le protocole de claim est une exigence de correction, pas une
/// optimisation : deux dispatchers concurrents sur le même ensemble de
/// lignes ne doivent jamais aboutir à deux publications réussies du même id.
#[async_trait]
pub trait OutboxStore: Send + Sync {
    /// CAS atomique : réserve jusqu'à `limit` lignes non traitées dont le
    /// bail est libre ou expiré, dont la fenêtre de backoff est écoulée et
    /// dont `attempts < max_attempts`, ordonnées FIFO par `occurred_on`.
    /// Le bail (`claimant`, expiration `lease` plus tard) garantit au plus
    /// une publication en vol par ligne.
    async fn claim_pending(
        &self,
        claimant: &str,
        lease: Duration,
        max_attempts: i32,
        limit: u32,
    ) -> Result<Vec<OutboxMessage>>;

    /// Transition unique `processed false -> true` + `processed_on`, commit
    /// LIGNE PAR LIGNE (jamais en batch : un batch re-publierait des lignes
    /// déjà envoyées si une ligne ultérieure échouait avant le commit).
    /// Conditionnée au bail : un bail perdu est un `ConcurrencyConflict`.
    async fn mark_processed(&self, id: Uuid, claimant: &str) -> Result<()>;

    /// Échec de publication : attempts+1, erreur consignée, prochaine
    /// tentative repoussée de `retry_in`, bail relâché.
    async fn mark_failed(
        &self,
        id: Uuid,
        claimant: &str,
        last_error: String,
        retry_in: Duration,
    ) -> Result<()>;

    /// Relâche le bail sans consommer de tentative (cas du topic NULL :
    /// la ligne doit rester visible et alertable, pas s'épuiser).
    async fn release_claim(&self, id: Uuid, claimant: &str) -> Result<()>;

    /// Comptage des lignes bloquées pour l'alerte d'exploitation.
    async fn count_stuck(&self, max_attempts: i32) -> Result<StuckSummary>;
}
