// crates/shared-kernel/src/domain/outbox/routing.rs

use std::collections::HashMap;
use crate::errors::{DomainError, Result};

/// Politique de routage `event_type -> topic`.
///
/// La table doit être TOTALE en production : un type sans route laisse la
/// colonne `topic` à NULL et la ligne devient un défaut de configuration
/// permanent, remonté par le dispatcher à chaque tick (jamais deviné,
/// jamais marqué traité).
///
/// Deux formes d'entrée :
/// - exacte : `reservation.created=reservation.events`
/// - préfixe : `reservation.*=reservation.events` (tout l'agrégat)
/// L'entrée exacte gagne sur le préfixe.
#[derive(Debug, Clone, Default)]
pub struct TopicRouter {
    exact: HashMap<String, String>,
    prefixes: HashMap<String, String>,
}

impl TopicRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse le format de configuration `pattern=topic,pattern=topic,...`
    /// (variable d'environnement OUTBOX_TOPIC_ROUTES).
    pub fn parse(routes: &str) -> Result<Self> {
        let mut router = Self::new();

        for entry in routes.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (pattern, topic) = entry.split_once('=').ok_or(DomainError::Validation {
                field: "topic_routes",
                reason: format!("'{}' is not of the form pattern=topic", entry),
            })?;

            router.insert(pattern.trim(), topic.trim());
        }

        Ok(router)
    }

    pub fn insert(&mut self, pattern: impl Into<String>, topic: impl Into<String>) {
        let pattern = pattern.into();

        match pattern.strip_suffix(".*") {
            Some(prefix) => self.prefixes.insert(prefix.to_string(), topic.into()),
            None => self.exact.insert(pattern, topic.into()),
        };
    }

    /// Résout le canal de destination pour un type d'événement.
    pub fn resolve(&self, event_type: &str) -> Option<&str> {
        if let Some(topic) = self.exact.get(event_type) {
            return Some(topic);
        }

        let prefix = event_type.split_once('.').map(|(p, _)| p)?;
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefixes.is_empty()
    }
}
