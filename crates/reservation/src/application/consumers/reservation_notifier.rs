// crates/reservation/src/application/consumers/reservation_notifier.rs

use std::sync::Arc;
use async_trait::async_trait;
use shared_kernel::application::ports::{EffectHandler, HandlerFailure};
use shared_kernel::domain::events::EventEnvelope;

use crate::application::ports::{Notification, NotificationError, NotificationSender};
use crate::domain::events::ReservationEvent;

/// Handler d'effet : notifie le client aux étapes clés de sa réservation.
///
/// L'idempotence vient du registre durable du pipeline, clé par event id :
/// une relivraison du même message n'envoie pas deux fois la notification.
pub struct ReservationNotifier {
    sender: Arc<dyn NotificationSender>,
}

impl ReservationNotifier {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    fn notification_for(event: &ReservationEvent) -> Notification {
        match event {
            ReservationEvent::ReservationCreated {
                reservation_id,
                customer_id,
                starts_at,
                ..
            } => Notification {
                customer_id: *customer_id,
                subject: "Votre réservation est enregistrée".into(),
                body: format!(
                    "Réservation {} enregistrée, prise en charge le {}",
                    reservation_id, starts_at
                ),
            },
            ReservationEvent::ReservationConfirmed {
                reservation_id,
                customer_id,
                ..
            } => Notification {
                customer_id: *customer_id,
                subject: "Votre réservation est confirmée".into(),
                body: format!("Réservation {} confirmée, votre véhicule est garanti", reservation_id),
            },
            ReservationEvent::ReservationCancelled {
                reservation_id,
                customer_id,
                reason,
                ..
            } => Notification {
                customer_id: *customer_id,
                subject: "Votre réservation est annulée".into(),
                body: match reason {
                    Some(reason) => format!("Réservation {} annulée : {}", reservation_id, reason),
                    None => format!("Réservation {} annulée", reservation_id),
                },
            },
        }
    }
}

#[async_trait]
impl EffectHandler for ReservationNotifier {
    fn handler_name(&self) -> &'static str {
        "reservation_notifier"
    }

    async fn apply(&self, envelope: &EventEnvelope) -> Result<(), HandlerFailure> {
        // Sélection du désérialiseur d'après le tag de schéma
        if !envelope.event_type.starts_with("reservation.") {
            // Pas pour ce handler : acquitter sans effet
            tracing::debug!(
                event_type = %envelope.event_type,
                "Event type not handled by notifier, skipping"
            );
            return Ok(());
        }

        let event: ReservationEvent = serde_json::from_value(envelope.payload.clone())
            .map_err(|e| {
                HandlerFailure::Invalid(format!(
                    "Malformed '{}' payload: {}",
                    envelope.event_type, e
                ))
            })?;

        let notification = Self::notification_for(&event);

        self.sender.send(notification).await.map_err(|e| match e {
            // L'émetteur sait distinguer la panne passagère du refus définitif
            NotificationError::Unavailable(msg) => HandlerFailure::Transient(msg),
            NotificationError::Rejected(msg) => HandlerFailure::Permanent(msg),
        })
    }
}
