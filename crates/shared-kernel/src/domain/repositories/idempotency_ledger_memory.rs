// crates/shared-kernel/src/domain/repositories/idempotency_ledger_memory.rs

use std::collections::HashSet;
use std::sync::Mutex;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::repositories::IdempotencyLedger;
use crate::errors::Result;

pub struct InMemoryLedger {
    applied: Mutex<HashSet<(String, Uuid)>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.applied.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.lock().unwrap().is_empty()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self {
            applied: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl IdempotencyLedger for InMemoryLedger {
    async fn already_applied(&self, handler: &str, event_id: Uuid) -> Result<bool> {
        Ok(self
            .applied
            .lock()
            .unwrap()
            .contains(&(handler.to_string(), event_id)))
    }

    async fn record_applied(&self, handler: &str, event_id: Uuid) -> Result<()> {
        // Le doublon est toléré, comme l'ON CONFLICT DO NOTHING du store réel
        self.applied
            .lock()
            .unwrap()
            .insert((handler.to_string(), event_id));
        Ok(())
    }
}
