// crates/shared-kernel/src/domain/outbox/routing_test.rs

#[cfg(test)]
mod tests {
    use crate::domain::outbox::TopicRouter;
    use crate::errors::DomainError;

    #[test]
    fn test_exact_route_wins_over_prefix() {
        // Arrange
        let mut router = TopicRouter::new();
        router.insert("reservation.*", "reservation.events");
        router.insert("reservation.cancelled", "reservation.alerts");

        // Act / Assert
        assert_eq!(router.resolve("reservation.cancelled"), Some("reservation.alerts"));
        assert_eq!(router.resolve("reservation.created"), Some("reservation.events"));
    }

    #[test]
    fn test_unrouted_type_resolves_to_none() {
        // Arrange
        let mut router = TopicRouter::new();
        router.insert("reservation.*", "reservation.events");

        // Act / Assert : pas de route -> None, jamais de topic deviné
        assert_eq!(router.resolve("driver.assigned"), None);
        assert_eq!(router.resolve("no-dot-type"), None);
    }

    #[test]
    fn test_parse_configuration_format() {
        // Arrange
        let routes = "reservation.*=reservation.events, customer.created=customer.events";

        // Act
        let router = TopicRouter::parse(routes).unwrap();

        // Assert
        assert_eq!(router.resolve("reservation.confirmed"), Some("reservation.events"));
        assert_eq!(router.resolve("customer.created"), Some("customer.events"));
        assert_eq!(router.resolve("customer.deleted"), None);
    }

    #[test]
    fn test_parse_rejects_malformed_entry() {
        // Act
        let result = TopicRouter::parse("reservation.events");

        // Assert
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_empty_routes_give_empty_router() {
        let router = TopicRouter::parse("").unwrap();
        assert!(router.is_empty());
    }
}
