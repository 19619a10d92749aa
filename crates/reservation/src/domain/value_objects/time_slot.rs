// crates/reservation/src/domain/value_objects/time_slot.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};

/// Créneau de prise en charge / restitution du véhicule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl TimeSlot {
    /// Constructeur sécurisé : valide l'ordre des bornes
    pub fn try_new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<Self> {
        let slot = Self { starts_at, ends_at };
        slot.validate()?;
        Ok(slot)
    }

    /// Reconstruction ultra-rapide pour l'infrastructure (DB)
    pub fn new_unchecked(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self { starts_at, ends_at }
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }
}

impl ValueObject for TimeSlot {
    fn validate(&self) -> Result<()> {
        if self.starts_at >= self.ends_at {
            return Err(DomainError::Validation {
                field: "time_slot",
                reason: format!(
                    "Slot must end after it starts ({} >= {})",
                    self.starts_at, self.ends_at
                ),
            });
        }
        Ok(())
    }
}
