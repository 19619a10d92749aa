// crates/shared-kernel/src/application/workers/outbox_dispatcher.rs

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::application::ports::MessageProducer;
use crate::domain::repositories::OutboxStore;
use crate::errors::AppResult;

#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    pub batch_size: u32,
    pub polling_interval: Duration,
    /// Durée du bail posé au claim : une exécution interrompue en plein
    /// batch laisse la ligne en vol se faire re-réclamer après expiration.
    pub lease_ttl: Duration,
    /// Plafond de tentatives : au-delà, la ligne sort du circuit de claim et
    /// n'apparaît plus que dans le résumé des lignes bloquées.
    pub max_attempts: i32,
    pub initial_backoff: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            polling_interval: Duration::from_secs(300),
            lease_ttl: Duration::from_secs(60),
            max_attempts: 10,
            initial_backoff: Duration::from_secs(30),
        }
    }
}

pub struct OutboxDispatcher {
    store: Arc<dyn OutboxStore>,
    broker: Arc<dyn MessageProducer>,
    /// Identité de cette instance, propriétaire des baux qu'elle pose
    claimant: String,
    config: DispatcherConfig,
}

impl OutboxDispatcher {
    pub fn new(
        store: Arc<dyn OutboxStore>,
        broker: Arc<dyn MessageProducer>,
        claimant: impl Into<String>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            store,
            broker,
            claimant: claimant.into(),
            config,
        }
    }

    pub async fn run(&self, mut shutdown_signal: tokio::sync::watch::Receiver<bool>) {
        tracing::info!("Outbox dispatcher '{}' started", self.claimant);

        loop {
            // 1. Vérification immédiate du signal d'arrêt
            if *shutdown_signal.borrow() {
                break;
            }

            // 2. Traitement d'un batch
            let mut dispatched_count = 0;
            match self.dispatch_batch().await {
                Ok(count) => {
                    dispatched_count = count;
                    if count > 0 {
                        tracing::info!("Dispatched {} events", count);
                    }
                }
                Err(e) => {
                    // Jamais remonté plus haut : il n'y a pas d'appelant
                    // synchrone, les baux posés expireront d'eux-mêmes
                    tracing::error!("Dispatch error: {:?}", e);
                }
            }

            // 3. Alerte d'exploitation sur les lignes qui ne progresseront plus
            match self.store.count_stuck(self.config.max_attempts).await {
                Ok(summary) if !summary.is_empty() => {
                    tracing::warn!(
                        unroutable = summary.unroutable,
                        exhausted = summary.exhausted,
                        "⚠️ Outbox rows stuck (unroutable topic or attempts exhausted)"
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Stuck-row check failed: {:?}", e),
            }

            // 4. Logique d'attente : batch plein = backlog, on reboucle vite ;
            // sinon on attend le prochain intervalle ou le signal d'arrêt
            if dispatched_count < self.config.batch_size as usize {
                tokio::select! {
                    _ = sleep(self.config.polling_interval) => {},
                    _ = shutdown_signal.changed() => break,
                }
            }
        }

        tracing::info!("Outbox dispatcher '{}' stopped gracefully", self.claimant);
    }

    /// Un tick : claim, puis pour chaque ligne publish + mark LIGNE PAR LIGNE.
    /// Retourne le nombre de publications réussies.
    pub async fn dispatch_batch(&self) -> AppResult<usize> {
        let claimed = self
            .store
            .claim_pending(
                &self.claimant,
                self.config.lease_ttl,
                self.config.max_attempts,
                self.config.batch_size,
            )
            .await?;

        if claimed.is_empty() {
            return Ok(0);
        }

        let mut dispatched = 0;

        for message in claimed {
            let Some(topic) = message.topic.clone() else {
                // Défaut de configuration permanent : la ligne reste en
                // attente et alertable, on ne consomme pas de tentative
                tracing::error!(
                    event_id = %message.id,
                    event_type = %message.event_type,
                    "No topic route configured for event type, row left pending"
                );
                self.store.release_claim(message.id, &self.claimant).await?;
                continue;
            };

            let body = message.body();

            match self
                .broker
                .publish(&topic, message.id, body.as_bytes(), "application/json")
                .await
            {
                Ok(()) => {
                    // Commit immédiat de la ligne seule : un batch groupé
                    // re-publierait les lignes déjà envoyées si une ligne
                    // suivante faisait échouer le commit
                    self.store.mark_processed(message.id, &self.claimant).await?;
                    dispatched += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        event_id = %message.id,
                        topic = %topic,
                        attempt = message.attempts + 1,
                        "Publish failed, will retry after backoff: {}",
                        e
                    );
                    self.store
                        .mark_failed(
                            message.id,
                            &self.claimant,
                            e.to_string(),
                            self.backoff_for(message.attempts),
                        )
                        .await?;
                }
            }
        }

        Ok(dispatched)
    }

    /// Backoff exponentiel plafonné à une heure
    fn backoff_for(&self, attempts: i32) -> Duration {
        let exp = attempts.clamp(0, 16) as u32;
        let backoff = self
            .config
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(exp));

        backoff.min(Duration::from_secs(3600))
    }
}
