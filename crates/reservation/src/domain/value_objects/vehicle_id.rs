// crates/reservation/src/domain/value_objects/vehicle_id.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use shared_kernel::errors::{DomainError, Result};

/// Référence vers le contexte Vehicle (collaborateur externe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(Uuid);

impl VehicleId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn new_unchecked(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for VehicleId {
    type Err = DomainError;
    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::Validation {
                field: "vehicle_id",
                reason: format!("'{}' is not a valid UUID", s),
            })
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
