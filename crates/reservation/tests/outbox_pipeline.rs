// crates/reservation/tests/outbox_pipeline.rs
//
// Scénario de bout en bout, uniquement sur les implémentations mémoire :
// commit métier -> ligne d'outbox -> dispatch -> publication -> consommation
// idempotente. Aucune dépendance externe.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use reservation::application::cancel_reservation::{CancelReservationCommand, CancelReservationUseCase};
use reservation::application::consumers::ReservationNotifier;
use reservation::application::create_reservation::{CreateReservationCommand, CreateReservationUseCase};
use reservation::application::ports::{Notification, NotificationError, NotificationSender};
use reservation::domain::entities::Reservation;
use reservation::domain::repositories::ReservationRepository;
use reservation::domain::value_objects::{CustomerId, ReservationId, VehicleId};
use shared_kernel::application::ports::{Delivery, Disposition, RecordingProducer};
use shared_kernel::application::workers::{DispatcherConfig, EventConsumer, OutboxDispatcher};
use shared_kernel::domain::outbox::TopicRouter;
use shared_kernel::domain::repositories::{InMemoryLedger, InMemoryOutbox, InMemoryTxManager};
use shared_kernel::domain::transaction::Transaction;
use shared_kernel::errors::{DomainError, Result};

// --- Stubs locaux (les collaborateurs CRUD ne sont pas conçus ici) ---

#[derive(Default)]
struct LocalReservationRepo {
    reservation_to_return: Mutex<Option<Reservation>>,
    error_to_return: Mutex<Option<DomainError>>,
    saved: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationRepository for LocalReservationRepo {
    async fn save(&self, reservation: &Reservation, _tx: Option<&mut dyn Transaction>) -> Result<()> {
        let error = self.error_to_return.lock().unwrap().clone();
        if let Some(err) = error {
            return Err(err);
        }

        self.saved.lock().unwrap().push(reservation.clone());
        Ok(())
    }

    async fn find_by_id(&self, _id: &ReservationId) -> Result<Option<Reservation>> {
        Ok(self.reservation_to_return.lock().unwrap().clone())
    }
}

#[derive(Default)]
struct LocalSender {
    sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationSender for LocalSender {
    async fn send(&self, notification: Notification) -> std::result::Result<(), NotificationError> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

fn routed_outbox() -> Arc<InMemoryOutbox> {
    let mut router = TopicRouter::new();
    router.insert("reservation.*", "reservation.events");

    Arc::new(InMemoryOutbox::new(router))
}

fn fast_dispatcher(outbox: Arc<InMemoryOutbox>, producer: Arc<RecordingProducer>) -> OutboxDispatcher {
    OutboxDispatcher::new(
        outbox,
        producer,
        "e2e-dispatcher",
        DispatcherConfig {
            batch_size: 10,
            polling_interval: Duration::from_millis(10),
            lease_ttl: Duration::from_secs(30),
            max_attempts: 5,
            initial_backoff: Duration::ZERO,
        },
    )
}

fn mk_create_command() -> CreateReservationCommand {
    let starts = Utc::now() + chrono::Duration::days(1);

    CreateReservationCommand {
        customer_id: CustomerId::new(),
        vehicle_id: VehicleId::new(),
        starts_at: starts,
        ends_at: starts + chrono::Duration::hours(4),
    }
}

#[tokio::test]
async fn test_created_event_travels_commit_dispatch_consume_exactly_once() {
    // --- 1. Commit métier : état + ligne d'outbox, atomiques ---
    let outbox = routed_outbox();
    let repo = Arc::new(LocalReservationRepo::default());
    let use_case = CreateReservationUseCase::new(
        repo.clone(),
        outbox.clone(),
        Arc::new(InMemoryTxManager::new(outbox.clone())),
    );

    let reservation = use_case.execute(mk_create_command()).await.unwrap();

    let rows = outbox.snapshot();
    assert_eq!(rows.len(), 1, "exactly one row per committed event");
    let row = &rows[0];
    assert!(!row.processed);
    assert_eq!(row.event_type, "reservation.created");
    assert_eq!(row.topic.as_deref(), Some("reservation.events"));

    // --- 2. Dispatch : publication puis marquage, ligne par ligne ---
    let producer = Arc::new(RecordingProducer::new());
    let dispatcher = fast_dispatcher(outbox.clone(), producer.clone());

    let dispatched = dispatcher.dispatch_batch().await.unwrap();
    assert_eq!(dispatched, 1);

    let published = producer.published.lock().unwrap().clone();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].message_id, row.id, "message id = outbox row id");
    assert_eq!(published[0].topic, "reservation.events");

    let processed_row = outbox.find(row.id).unwrap();
    assert!(processed_row.processed);
    assert!(processed_row.processed_on.unwrap() >= row.occurred_on);

    // --- 3. Consommation : effet appliqué une fois, relivraison acquittée ---
    let sender = Arc::new(LocalSender::default());
    let consumer = EventConsumer::new(
        Arc::new(ReservationNotifier::new(sender.clone())),
        Arc::new(InMemoryLedger::new()),
    );

    let delivery = Delivery {
        payload: published[0].body.clone().into_bytes(),
        content_type: Some(published[0].content_type.clone()),
    };

    let first = consumer.process(delivery.clone()).await;
    assert_eq!(first, Disposition::Complete);

    // Livraison dupliquée du même message : acquittée, effet non ré-appliqué
    let second = consumer.process(delivery).await;
    assert_eq!(second, Disposition::Complete);

    let sent = sender.sent.lock().unwrap();
    assert_eq!(sent.len(), 1, "duplicate delivery must not resend the notification");
    assert_eq!(sent[0].customer_id, reservation.customer_id);
}

#[tokio::test]
async fn test_rolled_back_transaction_leaves_zero_outbox_rows() {
    // Arrange : le repo métier refuse d'écrire, la transaction échoue
    let outbox = routed_outbox();
    let repo = Arc::new(LocalReservationRepo::default());
    *repo.error_to_return.lock().unwrap() =
        Some(DomainError::Internal("storage refused the write".into()));

    let use_case = CreateReservationUseCase::new(
        repo,
        outbox.clone(),
        Arc::new(InMemoryTxManager::new(outbox.clone())),
    );

    // Act
    let result = use_case.execute(mk_create_command()).await;

    // Assert : zéro ligne, l'événement a disparu avec la transaction
    assert!(result.is_err());
    assert!(outbox.snapshot().is_empty());
}

#[tokio::test]
async fn test_cancellation_flows_to_cancellation_notice() {
    // Arrange : une réservation existante, puis son annulation
    let outbox = routed_outbox();
    let repo = Arc::new(LocalReservationRepo::default());
    let create = CreateReservationUseCase::new(
        repo.clone(),
        outbox.clone(),
        Arc::new(InMemoryTxManager::new(outbox.clone())),
    );
    let reservation = create.execute(mk_create_command()).await.unwrap();
    *repo.reservation_to_return.lock().unwrap() = Some(reservation.clone());

    let cancel = CancelReservationUseCase::new(
        repo,
        outbox.clone(),
        Arc::new(InMemoryTxManager::new(outbox.clone())),
    );
    cancel
        .execute(CancelReservationCommand {
            reservation_id: reservation.reservation_id,
            reason: Some("Changement de programme".into()),
        })
        .await
        .unwrap();

    // Act : tout le backlog part dans l'ordre FIFO
    let producer = Arc::new(RecordingProducer::new());
    let dispatcher = fast_dispatcher(outbox.clone(), producer.clone());
    let dispatched = dispatcher.dispatch_batch().await.unwrap();
    assert_eq!(dispatched, 2);

    let sender = Arc::new(LocalSender::default());
    let consumer = EventConsumer::new(
        Arc::new(ReservationNotifier::new(sender.clone())),
        Arc::new(InMemoryLedger::new()),
    );

    let published = producer.published.lock().unwrap().clone();
    for message in &published {
        let disposition = consumer
            .process(Delivery {
                payload: message.body.clone().into_bytes(),
                content_type: Some(message.content_type.clone()),
            })
            .await;
        assert_eq!(disposition, Disposition::Complete);
    }

    // Assert : une notification par événement, l'annulation en dernier
    let sent = sender.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].subject.contains("annulée"));
}
