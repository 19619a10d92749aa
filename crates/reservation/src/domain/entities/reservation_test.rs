// crates/reservation/src/domain/entities/reservation_test.rs

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use shared_kernel::domain::events::DomainEvent;
    use shared_kernel::errors::DomainError;

    use crate::domain::entities::{Reservation, ReservationStatus};
    use crate::domain::value_objects::{CustomerId, TimeSlot, VehicleId};

    fn mk_reservation() -> Reservation {
        let starts = Utc::now() + Duration::days(1);
        let slot = TimeSlot::try_new(starts, starts + Duration::hours(4)).unwrap();
        let (reservation, _event) = Reservation::create(CustomerId::new(), VehicleId::new(), slot);

        reservation
    }

    #[test]
    fn test_create_returns_aggregate_and_event() {
        // Act
        let starts = Utc::now() + Duration::days(1);
        let slot = TimeSlot::try_new(starts, starts + Duration::hours(4)).unwrap();
        let (reservation, event) = Reservation::create(CustomerId::new(), VehicleId::new(), slot);

        // Assert : l'événement porte l'identité de l'agrégat, pas de buffer caché
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.version, 1);
        assert_eq!(event.event_type(), "reservation.created");
        assert_eq!(event.aggregate_id(), reservation.reservation_id.to_string());
    }

    #[test]
    fn test_confirm_produces_event_and_bumps_version() {
        // Arrange
        let mut reservation = mk_reservation();

        // Act
        let event = reservation.confirm().unwrap();

        // Assert
        assert!(event.is_some());
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.version, 2);
    }

    #[test]
    fn test_confirm_twice_is_a_non_event() {
        // Arrange
        let mut reservation = mk_reservation();
        reservation.confirm().unwrap();

        // Act
        let second = reservation.confirm().unwrap();

        // Assert : idempotence applicative, pas d'événement ni d'incrément
        assert!(second.is_none());
        assert_eq!(reservation.version, 2);
    }

    #[test]
    fn test_confirm_after_cancel_is_rejected() {
        // Arrange
        let mut reservation = mk_reservation();
        reservation.cancel(None).unwrap();

        // Act
        let result = reservation.confirm();

        // Assert
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_cancel_carries_reason() {
        // Arrange
        let mut reservation = mk_reservation();

        // Act
        let event = reservation
            .cancel(Some("Vehicle unavailable".to_string()))
            .unwrap()
            .unwrap();

        // Assert
        assert_eq!(reservation.status, ReservationStatus::Cancelled);
        assert_eq!(event.event_type(), "reservation.cancelled");
        let payload = event.payload();
        assert_eq!(payload["data"]["reason"], "Vehicle unavailable");
    }

    #[test]
    fn test_cancel_twice_is_a_non_event() {
        let mut reservation = mk_reservation();
        reservation.cancel(None).unwrap();

        assert!(reservation.cancel(None).unwrap().is_none());
    }
}
