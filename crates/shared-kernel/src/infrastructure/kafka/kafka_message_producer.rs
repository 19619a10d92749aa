// crates/shared-kernel/src/infrastructure/kafka/kafka_message_producer.rs

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::time::Duration;
use uuid::Uuid;
use crate::application::ports::MessageProducer;
use crate::errors::{AppError, AppResult, ErrorCode};

pub struct KafkaMessageProducer {
    producer: FutureProducer,
}

impl KafkaMessageProducer {
    pub async fn new(brokers: &str) -> AppResult<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            // Timeout borné : un dépassement est un échec de publication,
            // la ligne sera rejouée au tick suivant
            .set("message.timeout.ms", "5000")
            .set("compression.type", "snappy")
            .set("acks", "all")
            .set("queue.buffering.max.ms", "5")
            .set("batch.num.messages", "1000")
            .set("linger.ms", "10")
            // La clé de message = id de ligne : le broker peut dédupliquer
            .set("enable.idempotence", "true")
            .create()
            .map_err(|e| AppError::new(ErrorCode::InternalError, format!("Kafka config error: {e}")))?;

        Ok(Self { producer })
    }
}

#[async_trait]
impl MessageProducer for KafkaMessageProducer {
    async fn publish(
        &self,
        topic: &str,
        message_id: Uuid,
        body: &[u8],
        content_type: &str,
    ) -> AppResult<()> {
        let key = message_id.to_string();

        let record = FutureRecord::to(topic)
            .payload(body)
            .key(&key)
            .headers(OwnedHeaders::new()
                .insert(Header {
                    key: "message_id",
                    value: Some(&key),
                })
                .insert(Header {
                    key: "content-type",
                    value: Some(content_type),
                })
            );

        // Échec ou succès, rien entre les deux : la future ne résout Ok que
        // sur l'acquittement du broker
        self.producer
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(e, _)| AppError::from(e))?;

        Ok(())
    }
}
