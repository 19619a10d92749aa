// crates/shared-kernel/src/clock/mod.rs

mod system;

use chrono::{DateTime, Utc};

pub use system::SystemClock;

/// Abstraction du temps pour rendre les baux (leases) et horodatages testables.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
