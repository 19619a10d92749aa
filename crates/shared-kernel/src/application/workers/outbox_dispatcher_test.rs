// crates/shared-kernel/src/application/workers/outbox_dispatcher_test.rs

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    use crate::application::ports::RecordingProducer;
    use crate::application::workers::{DispatcherConfig, OutboxDispatcher};
    use crate::clock::Clock;
    use crate::domain::events::EventEnvelope;
    use crate::domain::outbox::{OutboxMessage, TopicRouter};
    use crate::domain::repositories::{InMemoryOutbox, OutboxStore};

    /// Horloge pilotée à la main pour tester l'expiration des baux
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Self {
            Self { now: Mutex::new(now) }
        }

        fn advance(&self, by: chrono::Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn mk_message(event_type: &str, topic: Option<&str>, occurred_on: DateTime<Utc>) -> OutboxMessage {
        let envelope = EventEnvelope {
            id: Uuid::now_v7(),
            aggregate_type: "reservation".into(),
            aggregate_id: Uuid::now_v7().to_string(),
            event_type: event_type.into(),
            payload: serde_json::json!({ "k": "v" }),
            occurred_at: occurred_on,
            metadata: None,
        };

        OutboxMessage::pending(&envelope, topic.map(String::from)).unwrap()
    }

    fn fast_config() -> DispatcherConfig {
        DispatcherConfig {
            batch_size: 100,
            polling_interval: Duration::from_millis(10),
            lease_ttl: Duration::from_secs(30),
            max_attempts: 5,
            initial_backoff: Duration::ZERO,
        }
    }

    fn setup(topic_routed: bool) -> (Arc<InMemoryOutbox>, Arc<RecordingProducer>, OutboxDispatcher) {
        let mut router = TopicRouter::new();
        if topic_routed {
            router.insert("reservation.*", "reservation.events");
        }

        let store = Arc::new(InMemoryOutbox::new(router));
        let producer = Arc::new(RecordingProducer::new());
        let dispatcher = OutboxDispatcher::new(
            store.clone(),
            producer.clone(),
            "dispatcher-1",
            fast_config(),
        );

        (store, producer, dispatcher)
    }

    #[tokio::test]
    async fn test_dispatch_publishes_then_marks_processed() {
        // Arrange
        let (store, producer, dispatcher) = setup(true);
        let t0 = Utc::now();
        let message = mk_message("reservation.created", Some("reservation.events"), t0);
        let id = message.id;
        store.seed_pending(message);

        // Act
        let dispatched = dispatcher.dispatch_batch().await.unwrap();

        // Assert
        assert_eq!(dispatched, 1);

        let published = producer.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].topic, "reservation.events");
        assert_eq!(published[0].message_id, id);
        assert_eq!(published[0].content_type, "application/json");

        let row = store.find(id).unwrap();
        assert!(row.processed);
        assert!(row.processed_on.unwrap() >= t0);
    }

    #[tokio::test]
    async fn test_failed_publish_leaves_row_pending_for_retry() {
        // Arrange : broker indisponible
        let (store, producer, dispatcher) = setup(true);
        let message = mk_message("reservation.created", Some("reservation.events"), Utc::now());
        let id = message.id;
        store.seed_pending(message);
        *producer.fail_with.lock().unwrap() = Some("broker unreachable".into());

        // Act
        let dispatched = dispatcher.dispatch_batch().await.unwrap();

        // Assert : causalité, jamais processed sans publication réussie
        assert_eq!(dispatched, 0);
        let row = store.find(id).unwrap();
        assert!(!row.processed);
        assert_eq!(row.attempts, 1);
        assert!(row.last_error.unwrap().contains("broker unreachable"));

        // Le broker revient : le tick suivant rejoue la ligne
        *producer.fail_with.lock().unwrap() = None;
        let dispatched = dispatcher.dispatch_batch().await.unwrap();
        assert_eq!(dispatched, 1);
        assert!(store.find(id).unwrap().processed);
    }

    #[tokio::test]
    async fn test_unroutable_row_is_never_marked_processed() {
        // Arrange : aucune route configurée -> topic NULL à l'écriture
        let (store, producer, dispatcher) = setup(false);
        let message = mk_message("reservation.created", None, Utc::now());
        let id = message.id;
        store.seed_pending(message);

        // Act : autant d'invocations qu'on veut
        for _ in 0..5 {
            let dispatched = dispatcher.dispatch_batch().await.unwrap();
            assert_eq!(dispatched, 0);
        }

        // Assert : jamais publié, jamais processed, pas de tentative consommée,
        // mais visible dans le résumé d'alerte
        assert_eq!(producer.publish_count(), 0);
        let row = store.find(id).unwrap();
        assert!(!row.processed);
        assert_eq!(row.attempts, 0);

        let summary = store.count_stuck(5).await.unwrap();
        assert_eq!(summary.unroutable, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_dispatchers_never_double_publish() {
        // Arrange : deux instances, même store, même producteur
        let mut router = TopicRouter::new();
        router.insert("reservation.*", "reservation.events");
        let store = Arc::new(InMemoryOutbox::new(router));
        let producer = Arc::new(RecordingProducer::new());
        // Latence artificielle pour élargir la fenêtre de course
        *producer.delay.lock().unwrap() = Some(Duration::from_millis(20));

        let mut ids = Vec::new();
        for _ in 0..8 {
            let message = mk_message("reservation.created", Some("reservation.events"), Utc::now());
            ids.push(message.id);
            store.seed_pending(message);
        }

        let dispatcher_a =
            OutboxDispatcher::new(store.clone(), producer.clone(), "dispatcher-a", fast_config());
        let dispatcher_b =
            OutboxDispatcher::new(store.clone(), producer.clone(), "dispatcher-b", fast_config());

        // Act : les deux ticks se recouvrent
        let (a, b) = tokio::join!(dispatcher_a.dispatch_batch(), dispatcher_b.dispatch_batch());

        // Assert : chaque ligne publiée au plus une fois, toutes traitées
        assert_eq!(a.unwrap() + b.unwrap(), 8);
        for id in ids {
            assert_eq!(producer.count_for(id), 1, "row {} double-published", id);
            assert!(store.find(id).unwrap().processed);
        }
    }

    #[tokio::test]
    async fn test_expired_lease_allows_reclaim() {
        // Arrange : un claim posé puis abandonné (crash simulé en plein batch)
        let start = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::starting_at(start));
        let mut router = TopicRouter::new();
        router.insert("reservation.*", "reservation.events");
        let store = Arc::new(InMemoryOutbox::with_clock(router, clock.clone()));

        let message = mk_message("reservation.created", Some("reservation.events"), start);
        let id = message.id;
        store.seed_pending(message);

        let claimed = store
            .claim_pending("crashed-instance", Duration::from_secs(60), 5, 10)
            .await
            .unwrap();
        assert_eq!(claimed.len(), 1);

        // Act 1 : bail encore actif, personne d'autre ne peut réclamer
        let reclaimed = store
            .claim_pending("dispatcher-2", Duration::from_secs(60), 5, 10)
            .await
            .unwrap();
        assert!(reclaimed.is_empty());

        // Act 2 : après expiration du bail, la ligne redevient réclamable
        clock.advance(chrono::Duration::seconds(61));
        let producer = Arc::new(RecordingProducer::new());
        let dispatcher =
            OutboxDispatcher::new(store.clone(), producer.clone(), "dispatcher-2", fast_config());
        let dispatched = dispatcher.dispatch_batch().await.unwrap();

        // Assert
        assert_eq!(dispatched, 1);
        assert_eq!(producer.count_for(id), 1);
        assert!(store.find(id).unwrap().processed);
    }

    #[tokio::test]
    async fn test_attempts_exhausted_row_leaves_claim_circuit() {
        // Arrange
        let mut config = fast_config();
        config.max_attempts = 2;

        let mut router = TopicRouter::new();
        router.insert("reservation.*", "reservation.events");
        let store = Arc::new(InMemoryOutbox::new(router));
        let producer = Arc::new(RecordingProducer::new());
        *producer.fail_with.lock().unwrap() = Some("broker down".into());

        let message = mk_message("reservation.created", Some("reservation.events"), Utc::now());
        let id = message.id;
        store.seed_pending(message);

        let dispatcher = OutboxDispatcher::new(store.clone(), producer.clone(), "d1", config);

        // Act : le plafond est atteint en deux ticks, le troisième ne claim plus rien
        for _ in 0..3 {
            dispatcher.dispatch_batch().await.unwrap();
        }

        // Assert
        let row = store.find(id).unwrap();
        assert!(!row.processed);
        assert_eq!(row.attempts, 2);

        let summary = store.count_stuck(2).await.unwrap();
        assert_eq!(summary.exhausted, 1);
    }

    #[tokio::test]
    async fn test_dispatch_order_is_fifo_on_occurred_on() {
        // Arrange : insérées dans le désordre
        let (store, producer, dispatcher) = setup(true);
        let t0 = Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap();
        let later = mk_message("reservation.cancelled", Some("reservation.events"), t0 + chrono::Duration::seconds(10));
        let earlier = mk_message("reservation.created", Some("reservation.events"), t0);
        let (later_id, earlier_id) = (later.id, earlier.id);
        store.seed_pending(later);
        store.seed_pending(earlier);

        // Act
        dispatcher.dispatch_batch().await.unwrap();

        // Assert
        let published = producer.published.lock().unwrap();
        assert_eq!(published[0].message_id, earlier_id);
        assert_eq!(published[1].message_id, later_id);
    }
}
