// crates/product/src/application/workers/refresh_scheduler.rs

use chrono::{DateTime, Utc};
use shared_kernel::application::ports::{MessageProducer, MessageProducerExt};
use shared_kernel::errors::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::domain::messages::EnrichmentRequest;
use crate::domain::repositories::ProductRepository;

#[derive(Debug, Clone)]
pub struct RefreshSettings {
    pub batch_size: u32,
    pub polling_interval: Duration,
    /// Âge maximal de `last_checked` avant re-publication
    pub check_interval: Duration,
    /// Délai avant de republier un produit déjà réclamé sans résultat
    pub enqueue_grace: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            batch_size: 100,
            polling_interval: Duration::from_millis(5000),
            check_interval: Duration::from_secs(1800),
            enqueue_grace: Duration::from_secs(300),
        }
    }
}

/// Republie périodiquement les demandes d'enrichissement des produits
/// jamais enrichis ou dont la dernière vérification est trop ancienne.
/// Rattrape aussi les publications perdues à la création.
pub struct RefreshScheduler<Repo, Broker>
where
    Repo: ProductRepository + ?Sized,
    Broker: MessageProducer + ?Sized,
{
    repo: Arc<Repo>,
    broker: Arc<Broker>,
    settings: RefreshSettings,
}

impl<Repo, Broker> RefreshScheduler<Repo, Broker>
where
    Repo: ProductRepository + ?Sized,
    Broker: MessageProducer + ?Sized,
{
    pub fn new(repo: Arc<Repo>, broker: Arc<Broker>, settings: RefreshSettings) -> Self {
        Self {
            repo,
            broker,
            settings,
        }
    }

    pub async fn run(&self, mut shutdown_signal: watch::Receiver<bool>) {
        tracing::info!(
            batch_size = self.settings.batch_size,
            check_interval_secs = self.settings.check_interval.as_secs(),
            "Refresh scheduler started"
        );

        loop {
            if *shutdown_signal.borrow() {
                break;
            }

            let claimed = match self.process_batch().await {
                Ok(count) => {
                    if count > 0 {
                        tracing::info!("Republished {} enrichment requests", count);
                    }
                    count
                }
                Err(e) => {
                    tracing::error!(error = %e, "Refresh cycle failed");
                    0
                }
            };

            // Batch complet : il reste probablement du travail, on reboucle
            if claimed < self.settings.batch_size as usize {
                tokio::select! {
                    _ = sleep(self.settings.polling_interval) => {},
                    _ = shutdown_signal.changed() => break,
                }
            }
        }

        tracing::info!("Refresh scheduler stopped gracefully");
    }

    /// Un cycle : réserve les produits dus puis publie une demande par produit.
    /// Rend le nombre de produits réservés.
    pub async fn process_batch(&self) -> Result<usize> {
        let now = Utc::now();
        let stale_before = cutoff(now, self.settings.check_interval);
        let requeue_before = cutoff(now, self.settings.enqueue_grace);

        let due = self
            .repo
            .claim_due_for_refresh(stale_before, requeue_before, self.settings.batch_size)
            .await?;

        for product in &due {
            let request = EnrichmentRequest::for_product(product);

            // Échec isolé : le produit reste dû et sera repris après enqueue_grace
            if let Err(e) = self.broker.publish_json(&request).await {
                tracing::warn!(product_id = %product.id(), error = %e, "Failed to republish enrichment request");
            }
        }

        Ok(due.len())
    }
}

/// `now - age`, borné au plus petit instant représentable.
fn cutoff(now: DateTime<Utc>, age: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(age)
        .ok()
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewProduct, Product};
    use crate::domain::repositories::ProductRepositoryStub;
    use crate::domain::value_objects::{Marketplace, Price, ProductId, ProductTitle, UserId};
    use chrono::Duration as ChronoDuration;
    use shared_kernel::application::ports::MessageProducerStub;
    use shared_kernel::domain::value_objects::Url;
    use shared_kernel::errors::DomainError;

    fn product(id: i64, created_at: DateTime<Utc>) -> Product {
        Product::created(
            ProductId::from_raw(id),
            NewProduct::new(
                UserId::from_raw(7),
                Url::try_new(format!("https://www.aliexpress.com/item/{id}.html")).unwrap(),
                ProductTitle::try_new("Cable").unwrap(),
                Marketplace::Aliexpress,
            ),
            created_at,
        )
    }

    fn settings() -> RefreshSettings {
        RefreshSettings {
            batch_size: 10,
            polling_interval: Duration::from_millis(10),
            check_interval: Duration::from_secs(3600),
            enqueue_grace: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn test_publishes_unenriched_and_stale_products_only() {
        let old = Utc::now() - ChronoDuration::hours(3);
        let mut fresh = product(2, old);
        fresh.apply_parsed_data(Price::from_raw(500), true, Utc::now());
        let mut stale = product(3, old);
        stale.apply_parsed_data(Price::from_raw(500), true, Utc::now() - ChronoDuration::hours(2));

        let repo = Arc::new(ProductRepositoryStub::with_products(vec![product(1, old), fresh, stale]));
        let broker = Arc::new(MessageProducerStub::default());
        let scheduler = RefreshScheduler::new(repo, broker.clone(), settings());

        let claimed = scheduler.process_batch().await.unwrap();

        let mut ids: Vec<i64> = broker
            .published_json::<EnrichmentRequest>()
            .iter()
            .map(|r| r.id.as_i64())
            .collect();
        ids.sort();
        assert_eq!(claimed, 2);
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_claimed_product_is_not_republished_within_grace() {
        let repo = Arc::new(ProductRepositoryStub::with_products(vec![product(
            1,
            Utc::now() - ChronoDuration::hours(3),
        )]));
        let broker = Arc::new(MessageProducerStub::default());
        let scheduler = RefreshScheduler::new(repo, broker.clone(), settings());

        scheduler.process_batch().await.unwrap();
        let second = scheduler.process_batch().await.unwrap();

        assert_eq!(second, 0);
        assert_eq!(broker.published_count(), 1);
    }

    #[tokio::test]
    async fn test_brand_new_product_waits_for_grace() {
        // Sa publication initiale est peut-être encore en vol
        let repo = Arc::new(ProductRepositoryStub::with_products(vec![product(1, Utc::now())]));
        let broker = Arc::new(MessageProducerStub::default());
        let scheduler = RefreshScheduler::new(repo, broker.clone(), settings());

        assert_eq!(scheduler.process_batch().await.unwrap(), 0);
        assert_eq!(broker.published_count(), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_abort_cycle() {
        let old = Utc::now() - ChronoDuration::hours(3);
        let repo = Arc::new(ProductRepositoryStub::with_products(vec![product(1, old), product(2, old)]));
        let broker = Arc::new(MessageProducerStub::failing());
        let scheduler = RefreshScheduler::new(repo, broker.clone(), settings());

        let claimed = scheduler.process_batch().await.unwrap();

        assert_eq!(claimed, 2);
        assert_eq!(broker.published_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_size_bounds_a_cycle() {
        let old = Utc::now() - ChronoDuration::hours(3);
        let products = (1..=5).map(|i| product(i, old)).collect();
        let repo = Arc::new(ProductRepositoryStub::with_products(products));
        let broker = Arc::new(MessageProducerStub::default());
        let scheduler = RefreshScheduler::new(
            repo,
            broker.clone(),
            RefreshSettings {
                batch_size: 2,
                ..settings()
            },
        );

        assert_eq!(scheduler.process_batch().await.unwrap(), 2);
        assert_eq!(broker.published_count(), 2);
    }

    #[tokio::test]
    async fn test_store_error_is_reported() {
        let repo = Arc::new(ProductRepositoryStub::default());
        repo.fail_with(DomainError::Infrastructure("db down".into()));
        let scheduler = RefreshScheduler::new(repo, Arc::new(MessageProducerStub::default()), settings());

        assert!(scheduler.process_batch().await.is_err());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_signal() {
        let old = Utc::now() - ChronoDuration::hours(3);
        let repo = Arc::new(ProductRepositoryStub::with_products(vec![product(1, old)]));
        let broker = Arc::new(MessageProducerStub::default());
        let scheduler = Arc::new(RefreshScheduler::new(repo, broker.clone(), settings()));
        let (tx, rx) = watch::channel(false);

        let running = tokio::spawn({
            let scheduler = Arc::clone(&scheduler);
            async move { scheduler.run(rx).await }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), running)
            .await
            .expect("scheduler did not stop")
            .unwrap();

        assert_eq!(broker.published_count(), 1);
    }
}
