mod reservation_repository;

pub use reservation_repository::ReservationRepository;

#[cfg(any(test, feature = "test-utils"))]
mod reservation_repository_stub;

#[cfg(any(test, feature = "test-utils"))]
pub use reservation_repository_stub::ReservationRepositoryStub;
