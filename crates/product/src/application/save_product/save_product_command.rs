// crates/product/src/application/save_product/save_product_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::Url;
use shared_kernel::errors::Result;

use crate::domain::value_objects::{Marketplace, ProductTitle, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProductCommand {
    pub user_id: UserId,
    pub url: Url,
    pub title: ProductTitle,
    pub marketplace: Marketplace,
}

impl SaveProductCommand {
    /// Depuis des valeurs brutes. Sans marketplace explicite, elle est
    /// déduite de l'hôte de l'URL.
    pub fn try_new(user_id: i64, url: &str, title: &str, marketplace: Option<&str>) -> Result<Self> {
        let url = Url::try_new(url)?;
        let marketplace = match marketplace {
            Some(raw) => raw.parse()?,
            None => Marketplace::from_url(&url)?,
        };

        Ok(Self {
            user_id: UserId::try_new(user_id)?,
            url,
            title: ProductTitle::try_new(title)?,
            marketplace,
        })
    }
}
