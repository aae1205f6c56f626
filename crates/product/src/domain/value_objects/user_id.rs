// crates/product/src/domain/value_objects/user_id.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};
use std::fmt;

/// Propriétaire d'un produit suivi. Émis par le service d'authentification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    pub fn try_new(value: i64) -> Result<Self> {
        Self(value).validated()
    }

    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl ValueObject for UserId {
    fn validate(&self) -> Result<()> {
        if self.0 <= 0 {
            return Err(DomainError::Validation {
                field: "user_id",
                reason: "User ID must be positive".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = DomainError;
    fn try_from(value: i64) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}
