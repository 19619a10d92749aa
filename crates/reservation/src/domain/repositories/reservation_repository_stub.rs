// crates/reservation/src/domain/repositories/reservation_repository_stub.rs

use std::sync::Mutex;
use async_trait::async_trait;
use shared_kernel::domain::transaction::Transaction;
use shared_kernel::errors::{DomainError, Result};

use crate::domain::entities::Reservation;
use crate::domain::repositories::ReservationRepository;
use crate::domain::value_objects::ReservationId;

// --- STUB RESERVATION REPOSITORY ---
pub struct ReservationRepositoryStub {
    pub reservation_to_return: Mutex<Option<Reservation>>,
    pub error_to_return: Mutex<Option<DomainError>>,
    /// Nombre d'échecs restants avant de laisser passer (tests de retry)
    pub fail_times: Mutex<u32>,
    pub saved: Mutex<Vec<Reservation>>,
}

impl Default for ReservationRepositoryStub {
    fn default() -> Self {
        Self {
            reservation_to_return: Mutex::new(None),
            error_to_return: Mutex::new(None),
            fail_times: Mutex::new(0),
            saved: Mutex::new(Vec::new()),
        }
    }
}

impl ReservationRepositoryStub {
    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryStub {
    async fn save(&self, reservation: &Reservation, _tx: Option<&mut dyn Transaction>) -> Result<()> {
        let error = self.error_to_return.lock().unwrap().clone();

        if let Some(err) = error {
            // fail_times == 0 : on échoue indéfiniment ; sinon on décompte
            // et l'erreur s'efface une fois le quota épuisé (tests de retry)
            let mut remaining = self.fail_times.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                if *remaining == 0 {
                    self.error_to_return.lock().unwrap().take();
                }
            }
            return Err(err);
        }

        self.saved.lock().unwrap().push(reservation.clone());
        Ok(())
    }

    async fn find_by_id(&self, _id: &ReservationId) -> Result<Option<Reservation>> {
        Ok(self.reservation_to_return.lock().unwrap().clone())
    }
}
