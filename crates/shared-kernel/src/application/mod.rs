pub mod ports;
pub mod workers;
