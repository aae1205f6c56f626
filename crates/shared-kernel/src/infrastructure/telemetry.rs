// crates/shared-kernel/src/infrastructure/telemetry.rs

use tracing_subscriber::EnvFilter;

/// Logs structurés sur stdout. Niveau piloté par `RUST_LOG` (défaut : info).
/// Sans effet si un subscriber global est déjà installé.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
