// crates/product/src/application/delete_product/delete_product_command.rs

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProductId, UserId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
    /// Seul le propriétaire peut supprimer
    pub owner: UserId,
}
