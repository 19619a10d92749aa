mod idempotency_ledger;
mod outbox_repository;
mod outbox_store;

pub use idempotency_ledger::IdempotencyLedger;
pub use outbox_repository::OutboxRepository;
pub use outbox_store::{OutboxStore, StuckSummary};

#[cfg(any(test, feature = "test-utils"))]
mod idempotency_ledger_memory;
#[cfg(any(test, feature = "test-utils"))]
mod outbox_repository_stub;
#[cfg(any(test, feature = "test-utils"))]
mod outbox_store_memory;

#[cfg(any(test, feature = "test-utils"))]
pub use idempotency_ledger_memory::InMemoryLedger;
#[cfg(any(test, feature = "test-utils"))]
pub use outbox_repository_stub::OutboxRepositoryStub;
#[cfg(any(test, feature = "test-utils"))]
pub use outbox_store_memory::{InMemoryOutbox, InMemoryTxManager};
