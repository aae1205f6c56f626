// crates/product/tests/common/fixtures.rs

use product::domain::entities::NewProduct;
use product::domain::value_objects::{Marketplace, ProductTitle, UserId};
use shared_kernel::domain::value_objects::Url;

pub fn new_product(owner: i64, url: &str, title: &str) -> NewProduct {
    let url = Url::try_new(url).unwrap();
    let marketplace = Marketplace::from_url(&url).unwrap();

    NewProduct::new(
        UserId::try_new(owner).unwrap(),
        url,
        ProductTitle::try_new(title).unwrap(),
        marketplace,
    )
}
