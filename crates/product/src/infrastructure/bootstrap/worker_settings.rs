// crates/product/src/infrastructure/bootstrap/worker_settings.rs

use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use std::str::FromStr;
use std::time::Duration;

use crate::application::cache::ProductCache;
use crate::application::workers::RefreshSettings;

/// Réglages des services produit, lus dans l'environnement (`PRODUCT_*`).
/// Une variable absente prend sa valeur par défaut, une valeur illisible
/// est une erreur de démarrage.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub request_queue: String,
    pub result_queue: String,
    pub worker_pool_size: usize,
    /// `None` : re-livraison sans limite
    pub max_redeliveries: Option<u32>,
    pub cache_ttl: Duration,
    pub refresh: RefreshSettings,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            request_queue: "parsing_queue".to_string(),
            result_queue: "parsed_queue".to_string(),
            worker_pool_size: 10,
            max_redeliveries: None,
            cache_ttl: ProductCache::DEFAULT_TTL,
            refresh: RefreshSettings::default(),
        }
    }
}

impl WorkerSettings {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let worker_pool_size: usize = parse(&lookup, "PRODUCT_WORKER_POOL_SIZE")?
            .unwrap_or(defaults.worker_pool_size);
        if worker_pool_size == 0 {
            return Err(invalid("PRODUCT_WORKER_POOL_SIZE", "must be at least 1"));
        }

        let batch_size: u32 = parse(&lookup, "PRODUCT_REFRESH_BATCH_SIZE")?
            .unwrap_or(defaults.refresh.batch_size);
        if batch_size == 0 {
            return Err(invalid("PRODUCT_REFRESH_BATCH_SIZE", "must be at least 1"));
        }

        let refresh = RefreshSettings {
            batch_size,
            polling_interval: parse(&lookup, "PRODUCT_REFRESH_POLLING_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.refresh.polling_interval),
            check_interval: parse(&lookup, "PRODUCT_CHECK_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh.check_interval),
            enqueue_grace: parse(&lookup, "PRODUCT_ENQUEUE_GRACE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh.enqueue_grace),
        };

        Ok(Self {
            request_queue: lookup("PRODUCT_REQUEST_QUEUE").unwrap_or(defaults.request_queue),
            result_queue: lookup("PRODUCT_RESULT_QUEUE").unwrap_or(defaults.result_queue),
            worker_pool_size,
            max_redeliveries: parse(&lookup, "PRODUCT_MAX_REDELIVERIES")?,
            cache_ttl: parse(&lookup, "PRODUCT_CACHE_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            refresh,
        })
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| invalid(key, &format!("'{}' ({})", raw, e))),
    }
}

fn invalid(key: &str, reason: &str) -> AppError {
    AppError::new(
        ErrorCode::InternalError,
        format!("Invalid configuration {}: {}", key, reason),
    )
}
