// crates/reservation/src/application/consumers/reservation_notifier_test.rs

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{Duration, Utc};
    use shared_kernel::application::ports::{EffectHandler, HandlerFailure};
    use shared_kernel::domain::events::{DomainEvent, EventEnvelope};

    use crate::application::consumers::ReservationNotifier;
    use crate::application::ports::{NotificationError, RecordingNotificationSender};
    use crate::domain::entities::Reservation;
    use crate::domain::value_objects::{CustomerId, TimeSlot, VehicleId};

    fn mk_envelope() -> EventEnvelope {
        let starts = Utc::now() + Duration::days(1);
        let slot = TimeSlot::try_new(starts, starts + Duration::hours(4)).unwrap();
        let (_reservation, event) = Reservation::create(CustomerId::new(), VehicleId::new(), slot);

        EventEnvelope::wrap(&event)
    }

    fn setup() -> (Arc<RecordingNotificationSender>, ReservationNotifier) {
        let sender = Arc::new(RecordingNotificationSender::new());
        let notifier = ReservationNotifier::new(sender.clone());

        (sender, notifier)
    }

    #[tokio::test]
    async fn test_created_event_sends_confirmation() {
        // Arrange
        let (sender, notifier) = setup();

        // Act
        let result = notifier.apply(&mk_envelope()).await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(sender.sent_count(), 1);
        let sent = sender.sent.lock().unwrap();
        assert!(sent[0].subject.contains("enregistrée"));
    }

    #[tokio::test]
    async fn test_foreign_event_type_is_skipped() {
        // Arrange : un événement d'un autre contexte sur le même topic
        let (sender, notifier) = setup();
        let mut envelope = mk_envelope();
        envelope.event_type = "driver.assigned".into();

        // Act
        let result = notifier.apply(&envelope).await;

        // Assert : acquitté sans effet
        assert!(result.is_ok());
        assert_eq!(sender.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_invalid_not_retried() {
        // Arrange : tag connu mais payload incohérent
        let (sender, notifier) = setup();
        let mut envelope = mk_envelope();
        envelope.payload = serde_json::json!({ "type": "Unknown", "data": 42 });

        // Act
        let result = notifier.apply(&envelope).await;

        // Assert
        assert!(matches!(result, Err(HandlerFailure::Invalid(_))));
        assert_eq!(sender.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_sender_outage_is_transient() {
        // Arrange
        let (sender, notifier) = setup();
        *sender.error_to_return.lock().unwrap() =
            Some(NotificationError::Unavailable("SMTP timeout".into()));

        // Act
        let result = notifier.apply(&mk_envelope()).await;

        // Assert : le pipeline retentera
        assert!(matches!(result, Err(HandlerFailure::Transient(_))));
    }

    #[tokio::test]
    async fn test_sender_rejection_is_permanent() {
        // Arrange
        let (sender, notifier) = setup();
        *sender.error_to_return.lock().unwrap() =
            Some(NotificationError::Rejected("Unknown recipient".into()));

        // Act
        let result = notifier.apply(&mk_envelope()).await;

        // Assert : dead-letter, inutile de rejouer
        assert!(matches!(result, Err(HandlerFailure::Permanent(_))));
    }

    #[tokio::test]
    async fn test_envelope_round_trip_from_raw_event() {
        // L'enveloppe qui circule sur le fil doit se désérialiser vers le
        // même événement typé que celui produit par l'agrégat
        let starts = Utc::now() + Duration::days(2);
        let slot = TimeSlot::try_new(starts, starts + Duration::hours(2)).unwrap();
        let (_, event) = Reservation::create(CustomerId::new(), VehicleId::new(), slot);
        let envelope = EventEnvelope::wrap(&event);

        let decoded: crate::domain::events::ReservationEvent =
            serde_json::from_value(envelope.payload.clone()).unwrap();

        assert_eq!(decoded.event_id(), event.event_id());
        assert_eq!(decoded.event_type(), event.event_type());
    }
}
