// crates/product/src/application/get_product_by_id/get_product_by_id_command.rs

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ProductId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetProductByIdCommand {
    pub product_id: ProductId,
}
