// crates/product/src/domain/value_objects/price.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};
use std::fmt;

/// Prix en plus petite unité monétaire (centimes). Jamais négatif.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn try_new(value: i64) -> Result<Self> {
        Self(value).validated()
    }

    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ValueObject for Price {
    fn validate(&self) -> Result<()> {
        if self.0 < 0 {
            return Err(DomainError::Validation {
                field: "price",
                reason: "Price cannot be negative".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Price {
    type Error = DomainError;
    fn try_from(value: i64) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}
