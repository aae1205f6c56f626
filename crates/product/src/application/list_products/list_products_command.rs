// crates/product/src/application/list_products/list_products_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::{DomainError, Result};

use crate::domain::value_objects::UserId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListProductsCommand {
    pub owner: UserId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListProductsCommand {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            limit: None,
            offset: None,
        }
    }

    pub fn with_page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Limite bornée à [1, MAX_LIMIT].
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn effective_offset(&self) -> Result<i64> {
        match self.offset.unwrap_or(0) {
            offset if offset < 0 => Err(DomainError::Validation {
                field: "offset",
                reason: "Offset cannot be negative".into(),
            }),
            offset => Ok(offset),
        }
    }
}
