// crates/shared-kernel/src/infrastructure/concurrency/singleflight.rs

//! Déduplication des lectures concurrentes sur une même clé.
//!
//! Quand N appelants ratent le cache pour la même clé au même moment,
//! un seul (le leader) exécute la lecture ; les autres attendent son
//! résultat. Si le leader est annulé, la clé est libérée et les suiveurs
//! reçoivent une erreur au lieu d'attendre indéfiniment.

use crate::errors::{AppError, ErrorCode};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{FutureExt, Shared};
use std::future::Future;
use std::hash::Hash;
use tokio::sync::oneshot;

type Flight<T, E> = Shared<oneshot::Receiver<std::result::Result<T, E>>>;

pub struct Singleflight<K, T, E = AppError>
where
    K: Hash + Eq,
{
    requests: DashMap<K, Flight<T, E>>,
}

impl<K, T, E> Default for Singleflight<K, T, E>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + From<AppError> + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Libère la clé même si le future du leader est abandonné.
struct LeaderGuard<'a, K: Hash + Eq, T, E> {
    requests: &'a DashMap<K, Flight<T, E>>,
    key: K,
}

impl<K: Hash + Eq, T, E> Drop for LeaderGuard<'_, K, T, E> {
    fn drop(&mut self) {
        self.requests.remove(&self.key);
    }
}

impl<K, T, E> Singleflight<K, T, E>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + From<AppError> + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
        }
    }

    pub async fn execute<F, Fut>(&self, key: K, factory: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        // Check-and-insert atomique, le verrou du shard est relâché avant tout .await
        let follower = match self.requests.entry(key.clone()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let (tx, rx) = oneshot::channel();
                entry.insert(rx.shared());

                let _guard = LeaderGuard {
                    requests: &self.requests,
                    key,
                };

                let result = factory().await;
                let _ = tx.send(result.clone());

                return result;
            }
        };

        match follower.await {
            Ok(result) => result,
            Err(_) => Err(E::from(AppError::new(
                ErrorCode::InternalError,
                "Singleflight leader was dropped before completing",
            ))),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_concurrent_callers_share_one_execution() {
        let flight: Arc<Singleflight<i64, String>> = Arc::new(Singleflight::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let flight = Arc::clone(&flight);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                flight
                    .execute(7, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok("value".to_string())
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "value");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(flight.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_leader_releases_key() {
        let flight: Singleflight<i64, u32> = Singleflight::new();

        let leader = flight.execute(1, || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        });
        let _ = tokio::time::timeout(Duration::from_millis(10), leader).await;

        assert_eq!(flight.in_flight(), 0);
        let next = flight.execute(1, || async { Ok(2) }).await.unwrap();
        assert_eq!(next, 2);
    }
}
