// crates/shared-kernel/src/domain/entities/entity.rs

use crate::errors::DomainError;

/// Nom et contraintes d'une entité persistée, utilisés pour fabriquer
/// des erreurs de domaine lisibles.
pub trait EntityMetadata {
    fn entity_name() -> &'static str;

    /// Champ métier correspondant à une contrainte SQL.
    fn map_constraint_to_field(_constraint: &str) -> &'static str {
        "unique_constraint"
    }

    fn not_found<I: ToString>(id: I) -> DomainError {
        DomainError::NotFound {
            entity: Self::entity_name(),
            id: id.to_string(),
        }
    }

    fn already_exists(constraint: &str, value: impl Into<String>) -> DomainError {
        DomainError::AlreadyExists {
            entity: Self::entity_name(),
            field: Self::map_constraint_to_field(constraint),
            value: value.into(),
        }
    }
}

pub trait EntityOptionExt<T> {
    fn ok_or_not_found<I: ToString>(self, id: I) -> Result<T, DomainError>
    where
        T: EntityMetadata;
}

impl<T> EntityOptionExt<T> for Option<T> {
    fn ok_or_not_found<I: ToString>(self, id: I) -> Result<T, DomainError>
    where
        T: EntityMetadata,
    {
        self.ok_or_else(|| T::not_found(id))
    }
}

pub trait ConflictValueExt<T> {
    /// Remplace la valeur générique d'un `AlreadyExists` par celle en conflit.
    fn with_conflict_value(self, value: impl Into<String>) -> Result<T, DomainError>;
}

impl<T> ConflictValueExt<T> for Result<T, DomainError> {
    fn with_conflict_value(self, value: impl Into<String>) -> Result<T, DomainError> {
        self.map_err(|e| match e {
            DomainError::AlreadyExists { entity, field, .. } => DomainError::AlreadyExists {
                entity,
                field,
                value: value.into(),
            },
            other => other,
        })
    }
}
