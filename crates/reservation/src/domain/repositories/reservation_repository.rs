// crates/reservation/src/domain/repositories/reservation_repository.rs

use async_trait::async_trait;
use shared_kernel::domain::transaction::Transaction;
use shared_kernel::errors::Result;

use crate::domain::entities::Reservation;
use crate::domain::value_objects::ReservationId;

/// Port vers le stockage des réservations (collaborateur externe : le CRUD
/// métier n'est pas conçu ici, seul le contrat d'écriture transactionnelle
/// compte pour le chemin de commit).
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// `tx` présent = écriture sur la transaction du Use Case (atomique avec
    /// l'outbox) ; absent = connexion simple.
    async fn save(&self, reservation: &Reservation, tx: Option<&mut dyn Transaction>) -> Result<()>;

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>>;
}
