mod postgres_error_mapper;
mod postgres_idempotency_ledger;
mod postgres_migrations;
mod postgres_outbox_repository;
mod postgres_outbox_row;
mod postgres_outbox_store;
mod postgres_transaction;
mod postgres_transaction_manager;

pub use postgres_error_mapper::SqlxErrorExt;
pub use postgres_idempotency_ledger::PostgresIdempotencyLedger;
pub use postgres_migrations::run_kernel_postgres_migrations;
pub use postgres_outbox_repository::PostgresOutboxRepository;
pub use postgres_outbox_row::OutboxRow;
pub use postgres_outbox_store::PostgresOutboxStore;
pub use postgres_transaction::{PostgresTransaction, TransactionExt};
pub use postgres_transaction_manager::PostgresTransactionManager;
