// crates/reservation/src/domain/entities/reservation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use shared_kernel::domain::entities::{Entity, EntityMetadata};
use shared_kernel::errors::{DomainError, Result};

use crate::domain::events::ReservationEvent;
use crate::domain::value_objects::{CustomerId, ReservationId, TimeSlot, VehicleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Agrégat Réservation (Modèle Riche).
///
/// Les opérations métier RETOURNENT leurs événements : pas de buffer
/// d'événements mutable sur l'entité, pas de scan au moment du commit.
/// C'est le Use Case qui porte la liste explicite jusqu'à l'outbox, dans la
/// même transaction que l'état. Une transaction annulée emporte les
/// événements avec elle, par construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub customer_id: CustomerId,
    pub vehicle_id: VehicleId,
    pub slot: TimeSlot,
    pub status: ReservationStatus,
    /// Version technique pour l'Optimistic Concurrency Control
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn create(
        customer_id: CustomerId,
        vehicle_id: VehicleId,
        slot: TimeSlot,
    ) -> (Self, ReservationEvent) {
        let reservation_id = ReservationId::new();
        let occurred_at = Utc::now();

        let reservation = Self {
            reservation_id,
            customer_id,
            vehicle_id,
            slot,
            status: ReservationStatus::Pending,
            version: 1,
            created_at: occurred_at,
            updated_at: None,
        };

        let event = ReservationEvent::ReservationCreated {
            id: Self::create_event_id(),
            reservation_id,
            customer_id,
            vehicle_id,
            starts_at: slot.starts_at(),
            ends_at: slot.ends_at(),
            occurred_at,
        };

        (reservation, event)
    }

    fn create_event_id() -> Uuid {
        Uuid::now_v7()
    }

    /// Pending -> Confirmed. Re-confirmer est un non-événement (idempotence
    /// applicative : pas d'événement, pas d'IO).
    pub fn confirm(&mut self) -> Result<Option<ReservationEvent>> {
        match self.status {
            ReservationStatus::Confirmed => return Ok(None),
            ReservationStatus::Cancelled => {
                return Err(DomainError::Validation {
                    field: "status",
                    reason: "A cancelled reservation cannot be confirmed".to_string(),
                });
            }
            ReservationStatus::Pending => {}
        }

        self.status = ReservationStatus::Confirmed;
        self.apply_change();

        Ok(Some(ReservationEvent::ReservationConfirmed {
            id: Self::create_event_id(),
            reservation_id: self.reservation_id,
            customer_id: self.customer_id,
            occurred_at: self.updated_at.unwrap_or(self.created_at),
        }))
    }

    /// Pending | Confirmed -> Cancelled. Annuler deux fois est un non-événement.
    pub fn cancel(&mut self, reason: Option<String>) -> Result<Option<ReservationEvent>> {
        if self.status == ReservationStatus::Cancelled {
            return Ok(None);
        }

        self.status = ReservationStatus::Cancelled;
        self.apply_change();

        Ok(Some(ReservationEvent::ReservationCancelled {
            id: Self::create_event_id(),
            reservation_id: self.reservation_id,
            customer_id: self.customer_id,
            reason,
            occurred_at: self.updated_at.unwrap_or(self.created_at),
        }))
    }

    fn apply_change(&mut self) {
        self.version += 1;
        self.updated_at = Some(Utc::now());
    }
}

impl EntityMetadata for Reservation {
    fn entity_name() -> &'static str {
        "Reservation"
    }
}

impl Entity for Reservation {
    type Id = ReservationId;

    fn id(&self) -> &Self::Id {
        &self.reservation_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
