// crates/reservation/src/application/ports/notification_sender.rs

use async_trait::async_trait;

use crate::domain::value_objects::CustomerId;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub customer_id: CustomerId,
    pub subject: String,
    pub body: String,
}

/// L'émetteur sait si son échec vaut la peine d'être retenté : cette
/// distinction remonte telle quelle au pipeline de consommation.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationError {
    /// Canal injoignable, timeout : transitoire
    Unavailable(String),
    /// Destinataire invalide, message refusé : définitif
    Rejected(String),
}

/// Port vers le canal de notification (mail, push... collaborateur externe).
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), NotificationError>;
}
