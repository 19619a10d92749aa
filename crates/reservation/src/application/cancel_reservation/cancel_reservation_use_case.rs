// crates/reservation/src/application/cancel_reservation/cancel_reservation_use_case.rs

use std::sync::Arc;
use shared_kernel::domain::entities::EntityOptionExt;
use shared_kernel::domain::repositories::OutboxRepository;
use shared_kernel::domain::transaction::{Transaction, TransactionManager, TransactionManagerExt};
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::{with_retry, RetryConfig};

use crate::application::cancel_reservation::CancelReservationCommand;
use crate::domain::entities::Reservation;
use crate::domain::repositories::ReservationRepository;

pub struct CancelReservationUseCase {
    repo: Arc<dyn ReservationRepository>,
    outbox_repo: Arc<dyn OutboxRepository>,
    tx_manager: Arc<dyn TransactionManager>,
}

impl CancelReservationUseCase {
    pub fn new(
        repo: Arc<dyn ReservationRepository>,
        outbox_repo: Arc<dyn OutboxRepository>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self { repo, outbox_repo, tx_manager }
    }

    pub async fn execute(&self, command: CancelReservationCommand) -> Result<Reservation> {
        with_retry(RetryConfig::default(), || async {
            self.try_execute_once(&command).await
        }).await
    }

    async fn try_execute_once(&self, cmd: &CancelReservationCommand) -> Result<Reservation> {
        // 1. Récupération de la réservation
        let mut reservation = self
            .repo
            .find_by_id(&cmd.reservation_id)
            .await?
            .ok_or_not_found(cmd.reservation_id)?;

        // 2. Application du changement : l'opération rend son événement
        let event = reservation.cancel(cmd.reason.clone())?;

        // Idempotence Applicative : déjà annulée -> rien à persister
        let Some(event) = event else {
            return Ok(reservation);
        };

        // 3. Persistence Transactionnelle
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
