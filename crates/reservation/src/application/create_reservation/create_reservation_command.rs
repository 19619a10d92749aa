// crates/reservation/src/application/create_reservation/create_reservation_command.rs

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CustomerId, VehicleId};

#[derive(Debug, Clone)]
pub struct CreateReservationCommand {
    pub customer_id: CustomerId,
    pub vehicle_id: VehicleId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}
