// crates/shared-kernel/src/infrastructure/postgres/postgres_outbox_repository.rs

use crate::domain::events::{DomainEvent, EventEnvelope};
use crate::domain::outbox::{OutboxMessage, TopicRouter};
use crate::domain::repositories::OutboxRepository;
use crate::domain::transaction::Transaction;
use crate::errors::Result;
use crate::infrastructure::postgres::{SqlxErrorExt, TransactionExt};
use async_trait::async_trait;
use sqlx::query;

pub struct PostgresOutboxRepository {
    router: TopicRouter,
}

impl PostgresOutboxRepository {
    pub fn new(router: TopicRouter) -> Self {
        Self { router }
    }
}

#[async_trait]
impl OutboxRepository for PostgresOutboxRepository {
    /// Insère la ligne SUR la transaction métier du caller : la ligne existe
    /// si et seulement si le commit métier aboutit. Une sérialisation
    /// impossible fait échouer tout le commit (fail-closed).
    async fn save(&self, tx: &mut dyn Transaction, event: &dyn DomainEvent) -> Result<()> {
        let envelope = EventEnvelope::wrap(event);
        let topic = self.router.resolve(&envelope.event_type).map(String::from);

        if topic.is_none() {
            // Défaut de configuration : on écrit quand même (le fait métier
            // ne doit pas se perdre), le dispatcher remontera l'alerte
            tracing::warn!(
                event_type = %envelope.event_type,
                "No topic route for event type, outbox row written without destination"
            );
        }

        let message = OutboxMessage::pending(&envelope, topic)?;
        let sqlx_tx = tx.downcast_mut_sqlx()?;

        query(
            r#"
            INSERT INTO outbox_messages (id, occurred_on, event_type, content, topic)
            VALUES ($1, $2, $3, $4, $5)
            "#
        )
            .bind(message.id)
            .bind(message.occurred_on)
            .bind(&message.event_type)
            .bind(&message.content)
            .bind(&message.topic)
            .execute(&mut **sqlx_tx)
            .await
            .map_domain_infra("Outbox")?;

        Ok(())
    }
}
