// crates/shared-kernel/src/domain/events/event.rs

use dyn_clone::DynClone;

use std::borrow::Cow;
use std::fmt::Debug;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Fait métier immuable, produit par une opération de domaine.
/// Les opérations retournent leurs événements EXPLICITEMENT (pas de buffer
/// mutable sur un type de base partagé) : l'orchestrateur du Use Case
/// collecte cette liste et la persiste dans la même transaction que l'état.
pub trait DomainEvent: DynClone + Debug + Send + Sync {
    /// Identifiant unique de l'événement, assigné à la création, immuable.
    /// Sert aussi de clé de déduplication côté broker et consommateur.
    fn event_id(&self) -> Uuid;

    /// Nom de l'événement (ex: "reservation.created")
    fn event_type(&self) -> Cow<'_, str>;

    /// Nom de l'agrégat (ex: "reservation")
    fn aggregate_type(&self) -> Cow<'_, str>;

    /// ID de l'agrégat (ex: "123e4567-e89b...")
    fn aggregate_id(&self) -> String;

    /// Horodatage (quand c'est arrivé) : définit l'ordre de dispatch (FIFO)
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Les données réelles en JSON
    fn payload(&self) -> Value;

    /// ID de corrélation pour le traçage distribué
    fn correlation_id(&self) -> Option<Uuid> {
        None
    }
}

dyn_clone::clone_trait_object!(DomainEvent);
