// crates/shared-kernel/src/infrastructure/postgres/postgres_idempotency_ledger.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use crate::domain::repositories::IdempotencyLedger;
use crate::errors::Result;
use crate::infrastructure::postgres::SqlxErrorExt;

/// Registre durable des effets appliqués : c'est lui qui rend les
/// consommateurs idempotents à travers N instances sans état partagé.
pub struct PostgresIdempotencyLedger {
    pool: PgPool,
}

impl PostgresIdempotencyLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdempotencyLedger for PostgresIdempotencyLedger {
    async fn already_applied(&self, handler: &str, event_id: Uuid) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM processed_events WHERE handler = $1 AND event_id = $2)",
        )
            .bind(handler)
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_domain_infra("Failed to check idempotency ledger")?;

        Ok(exists)
    }

    async fn record_applied(&self, handler: &str, event_id: Uuid) -> Result<()> {
        // Le doublon est un non-événement : deux livraisons concurrentes du
        // même message peuvent arriver ici en même temps
        sqlx::query(
            r#"
            INSERT INTO processed_events (handler, event_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
            .bind(handler)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_domain_infra("Failed to record applied effect")?;

        Ok(())
    }
}
