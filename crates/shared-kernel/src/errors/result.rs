// crates/shared-kernel/src/errors/result.rs

use crate::errors::{AppError, DomainError};

/// RESULT DU DOMAINE (Interne)
/// Utilisé par : Entités, Use Cases, Repositories (Ports).
pub type Result<T> = std::result::Result<T, DomainError>;

/// RESULT D'APPLICATION (Exécutable)
/// Utilisé par : Workers, Broker, Cache, bootstrap des services.
pub type AppResult<T> = std::result::Result<T, AppError>;
