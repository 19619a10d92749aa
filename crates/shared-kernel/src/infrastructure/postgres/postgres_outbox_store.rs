// crates/shared-kernel/src/infrastructure/postgres/postgres_outbox_store.rs

use std::time::Duration;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use crate::domain::outbox::OutboxMessage;
use crate::domain::repositories::{OutboxStore, StuckSummary};
use crate::errors::{DomainError, Result};
use crate::infrastructure::postgres::{OutboxRow, SqlxErrorExt};

pub struct PostgresOutboxStore {
    pool: PgPool,
}

impl PostgresOutboxStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutboxStore for PostgresOutboxStore {
    /// Claim CAS : FOR UPDATE SKIP LOCKED + colonnes de bail. Deux instances
    /// concurrentes ne peuvent jamais réserver la même ligne : le SELECT
    /// saute les lignes verrouillées et le filtre sur claimed_until ignore
    /// les baux encore actifs.
    async fn claim_pending(
        &self,
        claimant: &str,
        lease: Duration,
        max_attempts: i32,
        limit: u32,
    ) -> Result<Vec<OutboxMessage>> {
        let sql = r#"
            WITH selected AS (
                SELECT id FROM outbox_messages
                WHERE processed = FALSE
                  AND attempts < $3
                  AND next_attempt_at <= now()
                  AND (claimed_until IS NULL OR claimed_until < now())
                ORDER BY occurred_on ASC
                LIMIT $4
                FOR UPDATE SKIP LOCKED
            )
            UPDATE outbox_messages o
            SET claimed_by = $1,
                claimed_until = now() + make_interval(secs => $2)
            FROM selected
            WHERE o.id = selected.id
            RETURNING o.id, o.occurred_on, o.event_type, o.content, o.topic,
                      o.attempts, o.last_error, o.processed, o.processed_on
        "#;

        let rows = sqlx::query_as::<_, OutboxRow>(sql)
            .bind(claimant)
            .bind(lease.as_secs_f64())
            .bind(max_attempts)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_domain_infra("Failed to claim pending outbox rows")?;

        // Le RETURNING ne garantit pas l'ordre : on rétablit le FIFO
        let mut messages: Vec<OutboxMessage> = rows.into_iter().map(OutboxMessage::from).collect();
        messages.sort_by_key(|m| m.occurred_on);

        Ok(messages)
    }

    /// Commit ligne par ligne de la transition processed false -> true,
    /// conditionné au bail encore détenu
    async fn mark_processed(&self, id: Uuid, claimant: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE outbox_messages
            SET processed = TRUE,
                processed_on = now(),
                claimed_by = NULL,
                claimed_until = NULL
            WHERE id = $1 AND claimed_by = $2 AND processed = FALSE
            "#,
        )
            .bind(id)
            .bind(claimant)
            .execute(&self.pool)
            .await
            .map_domain_infra("Failed to mark outbox row as processed")?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ConcurrencyConflict {
                reason: format!("Lease lost on outbox message {}", id),
            });
        }

        Ok(())
    }

    async fn mark_failed(
        &self,
        id: Uuid,
        claimant: &str,
        last_error: String,
        retry_in: Duration,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE outbox_messages
            SET attempts = attempts + 1,
                last_error = $3,
                next_attempt_at = now() + make_interval(secs => $4),
                claimed_by = NULL,
                claimed_until = NULL
            WHERE id = $1 AND claimed_by = $2
            "#,
        )
            .bind(id)
            .bind(claimant)
            .bind(last_error)
            .bind(retry_in.as_secs_f64())
            .execute(&self.pool)
            .await
            .map_domain_infra("Failed to record outbox publish failure")?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ConcurrencyConflict {
                reason: format!("Lease lost on outbox message {}", id),
            });
        }

        Ok(())
    }

    async fn release_claim(&self, id: Uuid, claimant: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE outbox_messages
            SET claimed_by = NULL, claimed_until = NULL
            WHERE id = $1 AND claimed_by = $2
            "#,
        )
            .bind(id)
            .bind(claimant)
            .execute(&self.pool)
            .await
            .map_domain_infra("Failed to release outbox claim")?;

        Ok(())
    }

    async fn count_stuck(&self, max_attempts: i32) -> Result<StuckSummary> {
        let (unroutable, exhausted): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE topic IS NULL),
                COUNT(*) FILTER (WHERE topic IS NOT NULL AND attempts >= $1)
            FROM outbox_messages
            WHERE processed = FALSE
            "#,
        )
            .bind(max_attempts)
            .fetch_one(&self.pool)
            .await
            .map_domain_infra("Failed to count stuck outbox rows")?;

        Ok(StuckSummary {
            unroutable: unroutable as u64,
            exhausted: exhausted as u64,
        })
    }
}
