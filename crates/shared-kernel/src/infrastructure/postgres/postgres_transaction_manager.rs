// crates/shared-kernel/src/infrastructure/postgres/postgres_transaction_manager.rs

use std::future::Future;
use std::pin::Pin;
use sqlx::{Pool, Postgres};
use crate::domain::transaction::{Transaction, TransactionManager};
use crate::infrastructure::postgres::{PostgresTransaction, SqlxErrorExt};
use crate::errors::Result;

pub struct PostgresTransactionManager {
    pool: Pool<Postgres>,
}

impl PostgresTransactionManager {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

impl TransactionManager for PostgresTransactionManager {
    fn in_transaction<'a>(
        &'a self,
        f: Box<
            dyn for<'t> FnOnce(
                &'t mut dyn Transaction,
            ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 't>>
            + Send
            + 'a,
        >,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let tx = pool.begin().await.map_domain_infra("Failed to begin transaction")?;
            let mut wrapped = PostgresTransaction::new(tx);

            // Échec du closure = drop de la transaction = rollback sqlx :
            // aucune écriture partielle possible
            f(&mut wrapped).await?;

            wrapped
                .into_inner()
                .commit()
                .await
                .map_domain_infra("Failed to commit transaction")?;

            Ok(())
        })
    }
}
