// crates/shared-kernel/src/application/ports/message_producer_stub.rs

use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::MessageProducer;
use crate::errors::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub message_id: Uuid,
    pub body: String,
    pub content_type: String,
}

// --- STUB PRODUCER ---
pub struct RecordingProducer {
    pub published: Mutex<Vec<PublishedMessage>>,
    pub fail_with: Mutex<Option<String>>,
    /// Latence artificielle avant le succès, pour élargir les fenêtres de
    /// course dans les tests de concurrence
    pub delay: Mutex<Option<Duration>>,
}

impl RecordingProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn count_for(&self, message_id: Uuid) -> usize {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.message_id == message_id)
            .count()
    }
}

impl Default for RecordingProducer {
    fn default() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
            delay: Mutex::new(None),
        }
    }
}

#[async_trait]
impl MessageProducer for RecordingProducer {
    async fn publish(
        &self,
        topic: &str,
        message_id: Uuid,
        body: &[u8],
        content_type: &str,
    ) -> AppResult<()> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(reason) = self.fail_with.lock().unwrap().clone() {
            return Err(AppError::new(ErrorCode::InternalError, reason));
        }

        self.published.lock().unwrap().push(PublishedMessage {
            topic: topic.to_string(),
            message_id,
            body: String::from_utf8_lossy(body).into_owned(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}
