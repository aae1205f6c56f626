// crates/shared-kernel/src/infrastructure/redis/factories/redis_config.rs

use std::time::Duration;

/// Réglages du pool Redis servant de cache de lecture.
#[derive(Debug, Clone, PartialEq)]
pub struct RedisConfig {
    pub max_clients: usize,
    /// Borne la connexion et chaque commande ; au-delà la lecture retombe en erreur.
    pub command_timeout: Duration,
    pub max_command_attempts: u32,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            max_clients: 16,
            command_timeout: Duration::from_secs(5),
            max_command_attempts: 3,
        }
    }
}

impl RedisConfig {
    /// Surcharge depuis `PRODUCT_REDIS_MAX_CLIENTS` et `PRODUCT_REDIS_TIMEOUT_MS`.
    pub(crate) fn overridden_by_env(mut self) -> Self {
        if let Some(max) = env_parse::<usize>("PRODUCT_REDIS_MAX_CLIENTS") {
            self.max_clients = max.max(1);
        }
        if let Some(ms) = env_parse::<u64>("PRODUCT_REDIS_TIMEOUT_MS") {
            self.command_timeout = Duration::from_millis(ms);
        }
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
