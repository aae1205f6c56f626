// crates/product/src/domain/value_objects/product_id.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};
use std::fmt;
use std::str::FromStr;

/// Identifiant attribué par Postgres (BIGSERIAL), immuable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ProductId(i64);

impl ProductId {
    pub fn try_new(value: i64) -> Result<Self> {
        Self(value).validated()
    }

    /// Reconstruction rapide (Infrastructure / DB)
    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl ValueObject for ProductId {
    fn validate(&self) -> Result<()> {
        if self.0 <= 0 {
            return Err(DomainError::Validation {
                field: "product_id",
                reason: "Product ID must be positive".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.parse::<i64>().map_err(|_| DomainError::Validation {
            field: "product_id",
            reason: format!("'{}' is not a valid product id", s),
        })?;
        Self::try_new(value)
    }
}

impl TryFrom<i64> for ProductId {
    type Error = DomainError;
    fn try_from(value: i64) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
