// crates/reservation/src/domain/value_objects/time_slot_test.rs

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use shared_kernel::errors::DomainError;

    use crate::domain::value_objects::TimeSlot;

    #[test]
    fn test_valid_slot() {
        let starts = Utc::now();
        let slot = TimeSlot::try_new(starts, starts + Duration::hours(2)).unwrap();

        assert_eq!(slot.ends_at() - slot.starts_at(), Duration::hours(2));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let starts = Utc::now();
        let result = TimeSlot::try_new(starts, starts - Duration::minutes(1));

        assert!(matches!(result, Err(DomainError::Validation { field: "time_slot", .. })));
    }

    #[test]
    fn test_zero_length_slot_rejected() {
        let starts = Utc::now();
        let result = TimeSlot::try_new(starts, starts);

        assert!(result.is_err());
    }
}
