// crates/reservation/src/domain/value_objects/reservation_id.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use shared_kernel::domain::entities::EntityMetadata;
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::domain::Identifier;
use shared_kernel::errors::{DomainError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Génère un nouvel UUID v7 (Séquentiel, optimisé pour les index DB)
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Reconstruction depuis un type sûr (Interne/DB)
    pub fn new_unchecked(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Validation et création depuis une String (API/Entrée externe)
    pub fn try_new(id: impl Into<String>) -> Result<Self> {
        let s = id.into();
        Self::from_str(&s)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl ValueObject for ReservationId {
    fn validate(&self) -> Result<()> {
        if self.0.is_nil() {
            return Err(DomainError::Validation {
                field: "reservation_id",
                reason: "Reservation ID cannot be nil".to_string(),
            });
        }
        Ok(())
    }
}

impl Identifier for ReservationId {
    fn as_uuid(&self) -> Uuid {
        self.0
    }

    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

// --- CONVERSIONS ---

impl FromStr for ReservationId {
    type Err = DomainError;
    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::Validation {
                field: "reservation_id",
                reason: format!("'{}' is not a valid UUID", s),
            })
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EntityMetadata for ReservationId {
    fn entity_name() -> &'static str {
        "ReservationId"
    }
}
