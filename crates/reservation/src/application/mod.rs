pub mod cancel_reservation;
pub mod consumers;
pub mod create_reservation;
pub mod ports;
