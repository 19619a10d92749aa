// crates/reservation/src/infrastructure/mod.rs

pub mod notifications;
