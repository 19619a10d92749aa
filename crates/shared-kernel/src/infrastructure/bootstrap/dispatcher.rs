// crates/shared-kernel/src/infrastructure/bootstrap/dispatcher.rs

#![cfg(all(feature = "postgres", feature = "kafka"))]

use crate::application::workers::{DispatcherConfig, OutboxDispatcher};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::kafka::KafkaMessageProducer;
use crate::infrastructure::postgres::{run_kernel_postgres_migrations, PostgresOutboxStore};
use sqlx::PgPool;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

pub async fn run_outbox_dispatcher(domain_name: &str) -> AppResult<()> {
    // 1. Initialisation des logs
    tracing_subscriber::fmt::init();
    tracing::info!("📡 Starting Outbox Dispatcher for domain: {}", domain_name);

    // 2. Configuration via Environnement (avec valeurs par défaut)
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let brokers = env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string());

    let config = DispatcherConfig {
        batch_size: env_parse("OUTBOX_BATCH_SIZE", 100u32),
        // Référence : un passage toutes les 5 minutes
        polling_interval: Duration::from_millis(env_parse("OUTBOX_POLLING_MS", 300_000u64)),
        lease_ttl: Duration::from_millis(env_parse("OUTBOX_LEASE_MS", 60_000u64)),
        max_attempts: env_parse("OUTBOX_MAX_ATTEMPTS", 10i32),
        initial_backoff: Duration::from_millis(env_parse("OUTBOX_BACKOFF_MS", 30_000u64)),
    };

    // 3. Montage de l'infrastructure
    let pool = PgPool::connect(&db_url).await.map_err(|e| {
        AppError::new(ErrorCode::InternalError, e.to_string())
    })?;

    run_kernel_postgres_migrations(&pool)
        .await
        .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))?;

    let store = Arc::new(PostgresOutboxStore::new(pool));
    let producer = Arc::new(KafkaMessageProducer::new(&brokers).await?);

    // 4. Identité d'instance : propriétaire des baux qu'elle pose.
    // Unique par processus pour que deux replicas ne partagent jamais un bail.
    let claimant = format!(
        "{}-{}",
        env::var("HOSTNAME").unwrap_or_else(|_| domain_name.to_lowercase()),
        Uuid::now_v7()
    );

    let dispatcher = OutboxDispatcher::new(store, producer, claimant, config);

    // 5. Préparation du signal d'arrêt (Graceful Shutdown)
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // 6. Gestionnaire de signaux système (Ctrl+C, SIGTERM)
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("🛑 Shutdown signal received, stopping dispatcher...");
                let _ = shutdown_tx.send(true);
            }
            Err(err) => {
                tracing::error!("❌ Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    tracing::info!(
        "✅ Dispatcher configured: batch_size={}, interval={:?}, lease={:?}, max_attempts={}",
        config.batch_size,
        config.polling_interval,
        config.lease_ttl,
        config.max_attempts
    );

    // 7. Exécution
    dispatcher.run(shutdown_rx).await;

    tracing::info!("👋 Outbox dispatcher for {} exited clean", domain_name);
    Ok(())
}
