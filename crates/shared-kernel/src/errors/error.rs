// crates/shared-kernel/src/errors/error.rs

use thiserror::Error;
use crate::errors::{AppError, ErrorCode};

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

    /// Erreur de concurrence (Code Postgres 40001)
    #[error("Concurrency conflict: {reason}")]
    ConcurrencyConflict {
        reason: String
    },

    /// Succès partiel : l'écriture est durable, la publication a échoué.
    /// L'identifiant est conservé pour que l'appelant puisse le retrouver.
    #[error("{entity} '{id}' was saved but could not be published: {reason}")]
    PublishFailed {
        entity: &'static str,
        id: String,
        reason: String,
    },

    /// Erreur liée à l'infrastructure (DB, Redis, Broker)
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),

    #[error("Internal domain error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Utilisé pour savoir si l'erreur est fatale et ne doit pas être retry (ex: 409 Conflict)
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    pub fn is_publish_failure(&self) -> bool {
        matches!(self, Self::PublishFailed { .. })
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        match err.code {
            ErrorCode::NotFound => DomainError::NotFound {
                entity: "Resource",
                id: "unknown".into(),
            },
            ErrorCode::ConcurrencyConflict => DomainError::ConcurrencyConflict { reason: err.message },
            code if code.is_transient() => DomainError::Infrastructure(err.message),
            ErrorCode::InternalError => DomainError::Infrastructure(err.message),
            _ => DomainError::Internal(err.message),
        }
    }
}
