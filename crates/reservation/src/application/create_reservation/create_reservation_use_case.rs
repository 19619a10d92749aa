// crates/reservation/src/application/create_reservation/create_reservation_use_case.rs

use std::sync::Arc;
use shared_kernel::domain::repositories::OutboxRepository;
use shared_kernel::domain::transaction::{Transaction, TransactionManager, TransactionManagerExt};
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::{with_retry, RetryConfig};

use crate::application::create_reservation::CreateReservationCommand;
use crate::domain::entities::Reservation;
use crate::domain::repositories::ReservationRepository;
use crate::domain::value_objects::TimeSlot;

pub struct CreateReservationUseCase {
    repo: Arc<dyn ReservationRepository>,
    outbox_repo: Arc<dyn OutboxRepository>,
    tx_manager: Arc<dyn TransactionManager>,
}

impl CreateReservationUseCase {
    pub fn new(
        repo: Arc<dyn ReservationRepository>,
        outbox_repo: Arc<dyn OutboxRepository>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self { repo, outbox_repo, tx_manager }
    }

    pub async fn execute(&self, command: CreateReservationCommand) -> Result<Reservation> {
        with_retry(RetryConfig::default(), || async {
            self.try_execute_once(&command).await
        }).await
    }

    async fn try_execute_once(&self, cmd: &CreateReservationCommand) -> Result<Reservation> {
        // 1. Validation du créneau (Objet-Valeur)
        let slot = TimeSlot::try_new(cmd.starts_at, cmd.ends_at)?;

        // 2. L'opération métier retourne (agrégat, événement) explicitement :
        // aucun état caché à scanner au commit
        let (reservation, event) = Reservation::create(cmd.customer_id, cmd.vehicle_id, slot);

        // 3. Persistence Transactionnelle : état + ligne d'outbox, tout ou
        // rien. Si la sérialisation de l'événement échoue, le commit entier
        // échoue avec elle.
        let repo = self.repo.clone();
        let outbox = self.outbox_repo.clone();
        let to_persist = reservation.clone();

        self.tx_manager.run_in_transaction(move |tx: &mut dyn Transaction| {
            Box::pin(async move {
                repo.save(&to_persist, Some(&mut *tx)).await?;
                outbox.save(&mut *tx, &event).await?;

                Ok(())
            })
        }).await?;

        Ok(reservation)
    }
}
