// crates/reservation/src/infrastructure/notifications/log_notification_sender.rs

use async_trait::async_trait;

use crate::application::ports::{Notification, NotificationError, NotificationSender};

/// Adaptateur de repli : trace la notification au lieu de l'envoyer.
/// Le canal réel (mail, push) est un collaborateur externe branché en
/// production à la place de celui-ci.
pub struct LogNotificationSender;

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, notification: Notification) -> Result<(), NotificationError> {
        tracing::info!(
            customer_id = %notification.customer_id,
            subject = %notification.subject,
            "📬 {}",
            notification.body
        );

        Ok(())
    }
}
