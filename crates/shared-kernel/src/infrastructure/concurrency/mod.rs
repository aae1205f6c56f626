// crates/shared-kernel/src/infrastructure/concurrency/mod.rs

mod singleflight;
pub use singleflight::Singleflight;
