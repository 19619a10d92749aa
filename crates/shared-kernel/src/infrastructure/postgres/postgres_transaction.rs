// crates/shared-kernel/src/infrastructure/postgres/postgres_transaction.rs

use sqlx::{Postgres, Transaction as PostgresTx};
use crate::domain::transaction::Transaction;
use crate::errors::{DomainError, Result};

/// 1. La Structure (Le Conteneur)
pub struct PostgresTransaction {
    inner: PostgresTx<'static, Postgres>,
}

impl PostgresTransaction {
    pub fn new(tx: PostgresTx<'static, Postgres>) -> Self {
        Self { inner: tx }
    }

    pub fn get_mut(&mut self) -> &mut PostgresTx<'static, Postgres> {
        &mut self.inner
    }

    /// Récupère la transaction sqlx pour commit/rollback explicite
    pub fn into_inner(self) -> PostgresTx<'static, Postgres> {
        self.inner
    }
}

impl Transaction for PostgresTransaction {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// 2. Le Helper (L'outil de conversion)
pub trait TransactionExt {
    fn downcast_mut_sqlx(&mut self) -> Result<&mut PostgresTx<'static, Postgres>>;
}

impl TransactionExt for dyn Transaction + '_ {
    fn downcast_mut_sqlx(&mut self) -> Result<&mut PostgresTx<'static, Postgres>> {
        self.as_any_mut()
            .downcast_mut::<PostgresTransaction>()
            .map(|tx| tx.get_mut())
            .ok_or_else(|| DomainError::Internal("Type mismatch: Expected PostgresTransaction".into()))
    }
}
