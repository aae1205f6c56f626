// crates/product/src/infrastructure/bootstrap/mod.rs

mod enrichment_worker;
mod product_operator;
mod refresh_scheduler;
mod worker_settings;

pub use enrichment_worker::run_enrichment_worker;
pub use product_operator::build_product_operator;
pub use refresh_scheduler::run_refresh_scheduler;
pub use worker_settings::WorkerSettings;
