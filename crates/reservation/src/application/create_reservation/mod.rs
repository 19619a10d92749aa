mod create_reservation_command;
mod create_reservation_use_case;


pub use create_reservation_command::CreateReservationCommand;
pub use create_reservation_use_case::CreateReservationUseCase;
