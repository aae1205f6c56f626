// crates/shared-kernel/src/domain/repositories/cache_repository_stub.rs

use crate::domain::repositories::CacheRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct CacheRepositoryStub {
    pub storage: Mutex<HashMap<String, String>>,
    pub ttls: Mutex<HashMap<String, Option<Duration>>>,
    /// Toutes les opérations échouent (Redis down)
    pub fail_all: bool,
    /// Seules les écritures échouent
    pub fail_writes: bool,
    pub get_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
}

impl Default for CacheRepositoryStub {
    fn default() -> Self {
        Self {
            storage: Mutex::new(HashMap::new()),
            ttls: Mutex::new(HashMap::new()),
            fail_all: false,
            fail_writes: false,
            get_calls: AtomicUsize::new(0),
            set_calls: AtomicUsize::new(0),
        }
    }
}

impl CacheRepositoryStub {
    pub fn down() -> Self {
        Self { fail_all: true, ..Default::default() }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.storage.lock().unwrap().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.storage.lock().unwrap().get(key).cloned()
    }

    fn cache_down() -> AppError {
        AppError::new(ErrorCode::InfrastructureFailure, "Cache Down")
    }
}

#[async_trait]
impl CacheRepository for CacheRepositoryStub {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all || self.fail_writes {
            return Err(Self::cache_down());
        }
        self.storage
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.ttls.lock().unwrap().insert(key.to_string(), ttl);
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::cache_down());
        }
        Ok(self.storage.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if self.fail_all || self.fail_writes {
            return Err(Self::cache_down());
        }
        self.storage.lock().unwrap().remove(key);
        Ok(())
    }
}
