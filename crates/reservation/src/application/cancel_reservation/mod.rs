mod cancel_reservation_command;
mod cancel_reservation_use_case;


pub use cancel_reservation_command::CancelReservationCommand;
pub use cancel_reservation_use_case::CancelReservationUseCase;
