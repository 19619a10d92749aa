// crates/shared-kernel/src/infrastructure/bootstrap/consumer.rs

#![cfg(all(feature = "postgres", feature = "kafka"))]

use crate::application::ports::{EffectHandler, MessageConsumer};
use crate::application::workers::EventConsumer;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::kafka::KafkaMessageConsumer;
use crate::infrastructure::postgres::{run_kernel_postgres_migrations, PostgresIdempotencyLedger};
use sqlx::PgPool;
use std::env;
use std::sync::Arc;

/// Monte un worker de consommation complet : Kafka -> pipeline idempotent ->
/// handler d'effet. Les relivraisons et la dead-letter sont gérées par le
/// pipeline, le handler ne voit que des enveloppes valides.
pub async fn run_effect_worker(
    domain_name: &str,
    default_topic: &str,
    handler: Arc<dyn EffectHandler>,
) -> AppResult<()> {
    // 1. Initialisation des logs
    tracing_subscriber::fmt::init();
    tracing::info!(
        "🚀 Starting effect worker '{}' for domain: {}",
        handler.handler_name(),
        domain_name
    );

    // 2. Configuration via Environnement
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let brokers = env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string());
    let topic = env::var("CONSUMER_TOPIC").unwrap_or_else(|_| default_topic.to_string());
    let group_id = env::var("CONSUMER_GROUP")
        .unwrap_or_else(|_| format!("{}-effects", domain_name.to_lowercase()));

    // 3. Montage de l'infrastructure
    let pool = PgPool::connect(&db_url).await.map_err(|e| {
        AppError::new(ErrorCode::InternalError, e.to_string())
    })?;

    run_kernel_postgres_migrations(&pool)
        .await
        .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))?;

    let ledger = Arc::new(PostgresIdempotencyLedger::new(pool));
    let pipeline = Arc::new(EventConsumer::new(handler, ledger));
    let consumer = Arc::new(KafkaMessageConsumer::new(&brokers, &group_id)?);

    // 4. Arrêt gracieux : Ctrl+C coupe la boucle de consommation
    let consumer_for_signal = Arc::clone(&consumer);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("🛑 Shutdown signal received, stopping consumer...");
                consumer_for_signal.stop();
            }
            Err(err) => {
                tracing::error!("❌ Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    // 5. Exécution
    consumer.consume(&topic, pipeline.into_delivery_handler()).await?;

    tracing::info!("👋 Effect worker for {} exited clean", domain_name);
    Ok(())
}
