// crates/shared-kernel/src/errors/app_error.rs

use crate::errors::{DomainError, ErrorCode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InfrastructureFailure, message)
    }
}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        match error {
            // 1. Cas : Entité introuvable (404)
            DomainError::NotFound { entity, id } => Self::new(
                ErrorCode::NotFound,
                format!("{entity} with id '{id}' not found"),
            ),

            // 2. Cas : Conflit d'unicité (409) - ex: URL déjà suivie
            DomainError::AlreadyExists {
                entity,
                field,
                value,
            } => Self::new(
                ErrorCode::AlreadyExists,
                format!("{entity} with {field} '{value}' already exists"),
            ),

            DomainError::ConcurrencyConflict { reason } => {
                Self::new(ErrorCode::ConcurrencyConflict, reason)
            }

            // 3. Cas : Validation (400)
            DomainError::Validation { field, reason } => Self {
                code: ErrorCode::ValidationFailed,
                message: format!("Validation failed for {field}"),
                details: Some(serde_json::json!({ "field": field, "reason": reason })),
            },

            // 4. Cas : Succès partiel, on expose l'id créé
            DomainError::PublishFailed { entity, id, reason } => Self {
                code: ErrorCode::PublishFailed,
                message: format!("{entity} '{id}' saved but not enqueued"),
                details: Some(serde_json::json!({ "id": id, "reason": reason })),
            },

            // 5. Cas : Erreurs techniques (500), détail masqué au client
            DomainError::Infrastructure(_) => Self::new(
                ErrorCode::InfrastructureFailure,
                "An infrastructure error occurred. Please try again later.",
            ),
            DomainError::Internal(_) => Self::new(
                ErrorCode::InternalError,
                "An unexpected error occurred. Please try again later.",
            ),
        }
    }
}

// Pour transformer les erreurs SQL (sqlx) en AppError
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // En interne, on log l'erreur réelle pour le debugging
        tracing::error!("Database infrastructure error: {:?}", err);

        Self::new(ErrorCode::InfrastructureFailure, "A database error occurred")
    }
}

// Pour transformer les erreurs AMQP (lapin) en AppError
#[cfg(feature = "amqp")]
impl From<lapin::Error> for AppError {
    fn from(err: lapin::Error) -> Self {
        tracing::error!("Broker infrastructure error: {:?}", err);

        Self::new(
            ErrorCode::InfrastructureFailure,
            format!("Messaging system error: {}", err),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
