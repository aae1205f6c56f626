// crates/product/src/domain/value_objects/product_title.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ProductTitle(String);

impl ProductTitle {
    pub const MAX_LENGTH: usize = 500;

    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        // Retrait des caractères de contrôle et des espaces superflus
        let cleaned: String = value
            .into()
            .chars()
            .filter(|c| !c.is_control())
            .collect();

        Self(cleaned.trim().to_string()).validated()
    }

    /// Reconstruction rapide (Infrastructure / DB)
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ProductTitle {
    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(DomainError::Validation {
                field: "title",
                reason: "Title cannot be empty".into(),
            });
        }

        if self.0.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation {
                field: "title",
                reason: format!("Title too long (max {})", Self::MAX_LENGTH),
            });
        }

        Ok(())
    }
}

impl fmt::Display for ProductTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductTitle {
    type Error = DomainError;
    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<ProductTitle> for String {
    fn from(title: ProductTitle) -> Self {
        title.0
    }
}
