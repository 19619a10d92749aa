// crates/reservation/src/application/cancel_reservation/cancel_reservation_command.rs

use crate::domain::value_objects::ReservationId;

#[derive(Debug, Clone)]
pub struct CancelReservationCommand {
    pub reservation_id: ReservationId,
    pub reason: Option<String>,
}
