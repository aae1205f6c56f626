// crates/shared-kernel/src/application/workers/mod.rs

mod worker_pool;
pub use worker_pool::WorkerPool;
