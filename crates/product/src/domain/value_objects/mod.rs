// crates/product/src/domain/value_objects/mod.rs

mod marketplace;
mod price;
mod product_id;
mod product_title;
mod user_id;

pub use marketplace::Marketplace;
pub use price::Price;
pub use product_id::ProductId;
pub use product_title::ProductTitle;
pub use user_id::UserId;
