// crates/shared-kernel/src/infrastructure/bootstrap/mod.rs

mod shutdown;
pub use shutdown::{spawn_shutdown_listener, wait_for_shutdown_signal};
