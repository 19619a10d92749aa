// crates/shared-kernel/src/infrastructure/bootstrap/mod.rs

mod consumer;
mod dispatcher;

#[cfg(all(feature = "postgres", feature = "kafka"))]
pub use consumer::run_effect_worker;
#[cfg(all(feature = "postgres", feature = "kafka"))]
pub use dispatcher::run_outbox_dispatcher;
