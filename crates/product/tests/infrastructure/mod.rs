// crates/product/tests/infrastructure/mod.rs

mod cache_it_for_product;
mod pipeline_it_for_enrichment;
mod repository_it_for_product;
