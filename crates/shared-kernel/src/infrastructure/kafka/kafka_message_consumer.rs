// crates/shared-kernel/src/infrastructure/kafka/kafka_message_consumer.rs

use crate::application::ports::{DeadLetterReason, Delivery, DeliveryHandler, Disposition, MessageConsumer};
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Header, Headers, Message, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::Offset;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct KafkaMessageConsumer {
    client_config: ClientConfig,
    // Les messages écartés partent vers `<topic>.dlq` avec le code raison
    dlq_producer: FutureProducer,
    shutdown_token: CancellationToken,
    retry_pause: Duration,
}

impl KafkaMessageConsumer {
    pub fn new(brokers: &str, group_id: &str) -> AppResult<Self> {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            // Acquittement manuel : le commit d'offset EST l'acquittement
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest") // Ne rate rien au démarrage
            // Sécurité pour ne pas perdre de messages si le processing est lent
            .set("session.timeout.ms", "45000")
            .set("max.poll.interval.ms", "300000");

        let dlq_producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .set("acks", "all")
            .create()
            .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))?;

        Ok(Self {
            client_config: config,
            dlq_producer,
            shutdown_token: CancellationToken::new(),
            retry_pause: Duration::from_secs(1),
        })
    }

    pub fn stop(&self) {
        log::info!("Signaling Kafka consumer to stop...");
        self.shutdown_token.cancel();
    }

    async fn dead_letter(
        &self,
        topic: &str,
        message: &BorrowedMessage<'_>,
        reason: DeadLetterReason,
        description: &str,
    ) -> bool {
        let dlq_topic = format!("{}.dlq", topic);
        let payload = message.payload().unwrap_or_default();
        let key = message.key().map(|k| k.to_vec()).unwrap_or_default();

        let record = FutureRecord::to(&dlq_topic)
            .payload(payload)
            .key(&key)
            .headers(OwnedHeaders::new()
                .insert(Header {
                    key: "reason",
                    value: Some(reason.as_str()),
                })
                .insert(Header {
                    key: "description",
                    value: Some(description),
                })
            );

        match self.dlq_producer.send(record, Duration::from_secs(5)).await {
            Ok(_) => {
                log::warn!("☠️ Message dead-lettered to {} ({}): {}", dlq_topic, reason.as_str(), description);
                true
            }
            Err((e, _)) => {
                log::error!("Failed to dead-letter message, will replay: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl MessageConsumer for KafkaMessageConsumer {
    async fn consume(&self, topic: &str, handler: DeliveryHandler) -> AppResult<()> {
        let consumer: StreamConsumer = self.client_config.create()?;
        consumer
            .subscribe(&[topic])
            .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))?;

        while !self.shutdown_token.is_cancelled() {
            tokio::select! {
                _ = self.shutdown_token.cancelled() => break,
                result = consumer.recv() => {
                    match result {
                        Ok(message) => {
                            let delivery = Delivery {
                                payload: message.payload().map(|p| p.to_vec()).unwrap_or_default(),
                                content_type: extract_content_type(&message),
                            };

                            match handler(delivery).await {
                                Disposition::Complete => {
                                    if let Err(e) = consumer.commit_message(&message, CommitMode::Async) {
                                        log::error!("Offset commit failed: {}", e);
                                    }
                                }
                                Disposition::Retry { reason } => {
                                    // Pas d'acquittement : on rejoue le même offset,
                                    // la relivraison repart d'une machine à états neuve
                                    log::warn!(
                                        "🔁 Transient failure at offset {}, replaying: {}",
                                        message.offset(),
                                        reason
                                    );
                                    if let Err(e) = consumer.seek(
                                        message.topic(),
                                        message.partition(),
                                        Offset::Offset(message.offset()),
                                        Duration::from_secs(5),
                                    ) {
                                        log::error!("Seek failed: {}", e);
                                    }
                                    tokio::time::sleep(self.retry_pause).await;
                                }
                                Disposition::DeadLetter { reason, description } => {
                                    // On n'acquitte qu'une fois le message réellement
                                    // rangé dans la DLQ, sinon il serait perdu
                                    if self.dead_letter(topic, &message, reason, &description).await {
                                        if let Err(e) = consumer.commit_message(&message, CommitMode::Async) {
                                            log::error!("Offset commit failed: {}", e);
                                        }
                                    } else {
                                        tokio::time::sleep(self.retry_pause).await;
                                    }
                                }
                            }
                        },
                        Err(e) => log::error!("Kafka receive error: {}", e),
                    }
                }
            }
        }

        log::info!("🛑 Kafka consumer loop stopped.");
        Ok(())
    }
}

fn extract_content_type(message: &BorrowedMessage<'_>) -> Option<String> {
    let headers = message.headers()?;

    headers
        .iter()
        .find(|h| h.key == "content-type")
        .and_then(|h| h.value)
        .map(|v| String::from_utf8_lossy(v).into_owned())
}
