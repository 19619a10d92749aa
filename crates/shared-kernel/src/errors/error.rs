// crates/shared-kernel/src/errors/domain_error.rs

use thiserror::Error;
use crate::errors::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed for field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: String
    },

    #[error("{entity} not found with id '{id}'")]
    NotFound {
        entity: &'static str,
        id: String
    },

    #[error("{entity} already exists with {field} = '{value}'")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String
    },

    /// Erreur de concurrence (Optimistic Locking / Version Mismatch)
    #[error("Concurrency conflict: {reason}")]
    ConcurrencyConflict {
        reason: String
    },

    /// Échec définitif après plusieurs tentatives de retry
    #[error("Operation failed after maximum retries: {0}")]
    TooManyConflicts(String),

    /// Sérialisation d'un événement impossible : le commit entier doit échouer
    /// (fail-closed, jamais d'écriture partielle dans l'outbox)
    #[error("Event serialization failed: {0}")]
    Serialization(String),

    /// Erreur liée à l'infrastructure (DB, Kafka)
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),

    /// Erreur générique du domaine (ex: erreur interne d'agrégat)
    #[error("Internal domain error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Utilisé par la boucle de Retry du Use Case
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }

    /// Utilisé pour savoir si l'erreur est fatale et ne doit pas être retry (ex: doublon de clé)
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        match err.code {
            crate::errors::ErrorCode::NotFound => DomainError::NotFound {
                entity: "Resource",
                id: "unknown".into()
            },
            _ => DomainError::Internal(err.message),
        }
    }
}
