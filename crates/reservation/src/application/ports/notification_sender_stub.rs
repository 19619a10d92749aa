// crates/reservation/src/application/ports/notification_sender_stub.rs

use std::sync::Mutex;
use async_trait::async_trait;

use crate::application::ports::{Notification, NotificationError, NotificationSender};

// --- STUB NOTIFICATION SENDER ---
pub struct RecordingNotificationSender {
    pub sent: Mutex<Vec<Notification>>,
    pub error_to_return: Mutex<Option<NotificationError>>,
}

impl Default for RecordingNotificationSender {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            error_to_return: Mutex::new(None),
        }
    }
}

impl RecordingNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSender for RecordingNotificationSender {
    async fn send(&self, notification: Notification) -> Result<(), NotificationError> {
        let error = self.error_to_return.lock().unwrap().clone();
        if let Some(err) = error {
            return Err(err);
        }

        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}
