// crates/reservation/src/domain/events/reservation_events.rs

use std::borrow::Cow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use shared_kernel::domain::events::DomainEvent;

use crate::domain::value_objects::{CustomerId, ReservationId, VehicleId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ReservationEvent {
    /// Création initiale (statut Pending)
    ReservationCreated {
        id: Uuid,
        reservation_id: ReservationId,
        customer_id: CustomerId,
        vehicle_id: VehicleId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        occurred_at: DateTime<Utc>,
    },

    /// Validation par l'exploitation : le véhicule est garanti
    ReservationConfirmed {
        id: Uuid,
        reservation_id: ReservationId,
        customer_id: CustomerId,
        occurred_at: DateTime<Utc>,
    },

    /// Annulation (client ou exploitation)
    ReservationCancelled {
        id: Uuid,
        reservation_id: ReservationId,
        customer_id: CustomerId,
        reason: Option<String>,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent for ReservationEvent {
    fn event_id(&self) -> Uuid {
        match self {
            Self::ReservationCreated { id, .. }
            | Self::ReservationConfirmed { id, .. }
            | Self::ReservationCancelled { id, .. } => *id,
        }
    }

    fn event_type(&self) -> Cow<'_, str> {
        match self {
            Self::ReservationCreated { .. } => Cow::Borrowed("reservation.created"),
            Self::ReservationConfirmed { .. } => Cow::Borrowed("reservation.confirmed"),
            Self::ReservationCancelled { .. } => Cow::Borrowed("reservation.cancelled"),
        }
    }

    fn aggregate_type(&self) -> Cow<'_, str> {
        Cow::Borrowed("reservation")
    }

    fn aggregate_id(&self) -> String {
        match self {
            Self::ReservationCreated { reservation_id, .. }
            | Self::ReservationConfirmed { reservation_id, .. }
            | Self::ReservationCancelled { reservation_id, .. } => reservation_id.to_string(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::ReservationCreated { occurred_at, .. }
            | Self::ReservationConfirmed { occurred_at, .. }
            | Self::ReservationCancelled { occurred_at, .. } => *occurred_at,
        }
    }

    fn payload(&self) -> Value {
        json!(self)
    }
}
