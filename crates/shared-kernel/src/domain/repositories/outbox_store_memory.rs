// crates/shared-kernel/src/domain/repositories/outbox_store_memory.rs
//
// Implémentation mémoire de l'outbox pour les tests : mêmes règles de bail
// et de transition que le store Postgres, sans dépendance externe.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::events::{DomainEvent, EventEnvelope};
use crate::domain::outbox::{OutboxMessage, TopicRouter};
use crate::domain::repositories::{OutboxRepository, OutboxStore, StuckSummary};
use crate::domain::transaction::{FakeTransaction, Transaction, TransactionManager};
use crate::errors::{DomainError, Result};

struct StoredRow {
    message: OutboxMessage,
    claimed_by: Option<String>,
    claimed_until: Option<DateTime<Utc>>,
    next_attempt_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    // Lignes écrites par `save` mais pas encore commitées
    staged: Vec<OutboxMessage>,
    rows: Vec<StoredRow>,
}

pub struct InMemoryOutbox {
    router: TopicRouter,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

impl InMemoryOutbox {
    pub fn new(router: TopicRouter) -> Self {
        Self::with_clock(router, Arc::new(SystemClock))
    }

    /// Horloge injectable : permet de tester l'expiration des baux sans
    /// attendre en temps réel.
    pub fn with_clock(router: TopicRouter, clock: Arc<dyn Clock>) -> Self {
        Self {
            router,
            clock,
            state: Mutex::new(State::default()),
        }
    }

    /// Insère une ligne directement commitée (mise en place de test).
    pub fn seed_pending(&self, message: OutboxMessage) {
        let now = self.clock.now();
        self.state.lock().unwrap().rows.push(StoredRow {
            message,
            claimed_by: None,
            claimed_until: None,
            next_attempt_at: now,
        });
    }

    pub fn commit_staged(&self) {
        let mut state = self.state.lock().unwrap();
        let now = self.clock.now();
        let staged = std::mem::take(&mut state.staged);

        for message in staged {
            state.rows.push(StoredRow {
                message,
                claimed_by: None,
                claimed_until: None,
                next_attempt_at: now,
            });
        }
    }

    pub fn discard_staged(&self) {
        self.state.lock().unwrap().staged.clear();
    }

    pub fn snapshot(&self) -> Vec<OutboxMessage> {
        self.state
            .lock()
            .unwrap()
            .rows
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn find(&self, id: Uuid) -> Option<OutboxMessage> {
        self.state
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|r| r.message.id == id)
            .map(|r| r.message.clone())
    }

    pub fn pending_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|r| !r.message.processed)
            .count()
    }
}

#[async_trait]
impl OutboxRepository for InMemoryOutbox {
    async fn save(&self, _tx: &mut dyn Transaction, event: &dyn DomainEvent) -> Result<()> {
        let envelope = EventEnvelope::wrap(event);
        let topic = self.router.resolve(&envelope.event_type).map(String::from);
        let message = OutboxMessage::pending(&envelope, topic)?;

        // Visible seulement après commit_staged (voir InMemoryTxManager)
        self.state.lock().unwrap().staged.push(message);
        Ok(())
    }
}

#[async_trait]
impl OutboxStore for InMemoryOutbox {
    async fn claim_pending(
        &self,
        claimant: &str,
        lease: Duration,
        max_attempts: i32,
        limit: u32,
    ) -> Result<Vec<OutboxMessage>> {
        let now = self.clock.now();
        let until = now + chrono::Duration::from_std(lease).unwrap_or(chrono::Duration::zero());
        let mut state = self.state.lock().unwrap();

        // FIFO strict sur occurred_on
        let mut candidates: Vec<usize> = (0..state.rows.len()).collect();
        candidates.sort_by_key(|&i| state.rows[i].message.occurred_on);

        let mut claimed = Vec::new();
        for i in candidates {
            if claimed.len() >= limit as usize {
                break;
            }

            let row = &mut state.rows[i];
            let lease_free = row.claimed_until.map(|t| t < now).unwrap_or(true);

            if !row.message.processed
                && row.message.attempts < max_attempts
                && row.next_attempt_at <= now
                && lease_free
            {
                row.claimed_by = Some(claimant.to_string());
                row.claimed_until = Some(until);
                claimed.push(row.message.clone());
            }
        }

        Ok(claimed)
    }

    async fn mark_processed(&self, id: Uuid, claimant: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let now = self.clock.now();
        let row = find_row(&mut state, id)?;

        if row.claimed_by.as_deref() != Some(claimant) {
            return Err(DomainError::ConcurrencyConflict {
                reason: format!("Lease lost on outbox message {}", id),
            });
        }

        row.message.processed = true;
        row.message.processed_on = Some(now);
        row.claimed_by = None;
        row.claimed_until = None;
        Ok(())
    }

    async fn mark_failed(
        &self,
        id: Uuid,
        claimant: &str,
        last_error: String,
        retry_in: Duration,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let now = self.clock.now();
        let row = find_row(&mut state, id)?;

        if row.claimed_by.as_deref() != Some(claimant) {
            return Err(DomainError::ConcurrencyConflict {
                reason: format!("Lease lost on outbox message {}", id),
            });
        }

        row.message.attempts += 1;
        row.message.last_error = Some(last_error);
        row.next_attempt_at =
            now + chrono::Duration::from_std(retry_in).unwrap_or(chrono::Duration::zero());
        row.claimed_by = None;
        row.claimed_until = None;
        Ok(())
    }

    async fn release_claim(&self, id: Uuid, claimant: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let row = find_row(&mut state, id)?;

        if row.claimed_by.as_deref() == Some(claimant) {
            row.claimed_by = None;
            row.claimed_until = None;
        }
        Ok(())
    }

    async fn count_stuck(&self, max_attempts: i32) -> Result<StuckSummary> {
        let state = self.state.lock().unwrap();
        let mut summary = StuckSummary::default();

        for row in state.rows.iter().filter(|r| !r.message.processed) {
            if row.message.topic.is_none() {
                summary.unroutable += 1;
            } else if row.message.attempts >= max_attempts {
                summary.exhausted += 1;
            }
        }

        Ok(summary)
    }
}

fn find_row(state: &mut State, id: Uuid) -> Result<&mut StoredRow> {
    state
        .rows
        .iter_mut()
        .find(|r| r.message.id == id)
        .ok_or(DomainError::NotFound {
            entity: "OutboxMessage",
            id: id.to_string(),
        })
}

/// Gestionnaire de transaction mémoire apparié à `InMemoryOutbox` : les
/// écritures faites pendant la closure ne deviennent visibles que si elle
/// réussit (simulation du commit/rollback Postgres pour les tests
/// d'atomicité).
pub struct InMemoryTxManager {
    outbox: Arc<InMemoryOutbox>,
}

impl InMemoryTxManager {
    pub fn new(outbox: Arc<InMemoryOutbox>) -> Self {
        Self { outbox }
    }
}

impl TransactionManager for InMemoryTxManager {
    fn in_transaction<'a>(
        &'a self,
        f: Box<
            dyn for<'t> FnOnce(
                &'t mut dyn Transaction,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = Result<()>> + Send + 't>,
            > + Send
            + 'a,
        >,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut tx = FakeTransaction;
            match f(&mut tx).await {
                Ok(()) => {
                    self.outbox.commit_staged();
                    Ok(())
                }
                Err(e) => {
                    self.outbox.discard_staged();
                    Err(e)
                }
            }
        })
    }
}
