mod reservation;

#[cfg(test)]
mod reservation_test;

pub use reservation::{Reservation, ReservationStatus};
