// crates/product/src/application/workers/mod.rs

mod enrichment_worker;
mod refresh_scheduler;

pub use enrichment_worker::EnrichmentWorker;
pub use refresh_scheduler::{RefreshScheduler, RefreshSettings};
