use std::sync::Mutex;

use crate::domain::events::{DomainEvent, EventEnvelope};
use crate::domain::repositories::OutboxRepository;
use crate::domain::transaction::Transaction;
use crate::errors::DomainError;

// --- STUB OUTBOX ---
pub struct OutboxRepositoryStub {
    pub saved: Mutex<Vec<EventEnvelope>>,
    pub error_to_return: Mutex<Option<DomainError>>,
}

impl OutboxRepositoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

impl Default for OutboxRepositoryStub {
    fn default() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            error_to_return: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl OutboxRepository for OutboxRepositoryStub {
    async fn save(&self, _tx: &mut dyn Transaction, event: &dyn DomainEvent) -> crate::errors::Result<()> {
        if let Some(err) = self.error_to_return.lock().unwrap().clone() {
            return Err(err);
        }

        self.saved.lock().unwrap().push(EventEnvelope::wrap(event));
        Ok(())
    }
}
