// crates/shared-kernel/src/infrastructure/postgres/factories/postgres_config.rs

use std::time::Duration;

/// Dimensionnement du pool sqlx.
///
/// Le consumer et le scheduler tiennent chacun au plus une connexion par
/// tâche en vol : `max_connections` doit rester au-dessus de la taille du
/// pool de workers.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }
}

impl PostgresConfig {
    /// `PRODUCT_DB_MAX_CONNECTIONS`, `PRODUCT_DB_MIN_CONNECTIONS`,
    /// `PRODUCT_DB_CONNECT_TIMEOUT` (secondes). Valeur illisible = défaut.
    pub(crate) fn overridden_by_env(mut self) -> Self {
        let read = |key: &str| std::env::var(key).ok().and_then(|v| v.trim().parse::<u64>().ok());

        if let Some(max) = read("PRODUCT_DB_MAX_CONNECTIONS") {
            self.max_connections = max.max(1) as u32;
        }
        if let Some(min) = read("PRODUCT_DB_MIN_CONNECTIONS") {
            self.min_connections = min as u32;
        }
        if let Some(secs) = read("PRODUCT_DB_CONNECT_TIMEOUT") {
            self.acquire_timeout = Duration::from_secs(secs);
        }
        self.min_connections = self.min_connections.min(self.max_connections);
        self
    }
}
