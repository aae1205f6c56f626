// crates/shared-kernel/src/infrastructure/postgres/mappers/postgres_error_mapper.rs

use crate::domain::entities::EntityMetadata;
use crate::errors::DomainError;
use sqlx::postgres::PgDatabaseError;

const UNIQUE_VIOLATION: &str = "23505";
const SERIALIZATION_FAILURE: &str = "40001";

pub trait SqlxErrorExt<T> {
    /// Traduit les codes Postgres connus en erreurs du domaine de `E`.
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError>;
    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError>;
}

impl<T> SqlxErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError> {
        self.map_err(|e| match e {
            sqlx::Error::RowNotFound => DomainError::NotFound {
                entity: E::entity_name(),
                id: "unknown".into(),
            },
            sqlx::Error::Database(db_err) => {
                let code = db_err.code();

                if code.as_deref() == Some(UNIQUE_VIOLATION) {
                    let constraint = db_err
                        .try_downcast_ref::<PgDatabaseError>()
                        .and_then(|pg| pg.constraint());

                    return DomainError::AlreadyExists {
                        entity: E::entity_name(),
                        field: constraint
                            .map(E::map_constraint_to_field)
                            .unwrap_or("unique_constraint"),
                        value: "already taken".into(),
                    };
                }

                if code.as_deref() == Some(SERIALIZATION_FAILURE) {
                    return DomainError::ConcurrencyConflict {
                        reason: format!("Concurrency conflict on {}", E::entity_name()),
                    };
                }

                tracing::error!(error = %db_err, entity = E::entity_name(), "Database error");
                DomainError::Infrastructure(db_err.message().into())
            }
            other => {
                tracing::error!(error = %other, entity = E::entity_name(), "Database error");
                DomainError::Infrastructure(other.to_string())
            }
        })
    }

    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{}: {}", context, e)))
    }
}
