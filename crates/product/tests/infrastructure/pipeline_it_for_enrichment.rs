// crates/product/tests/infrastructure/pipeline_it_for_enrichment.rs

use futures_util::FutureExt;
use product::application::apply_enrichment_result::ApplyEnrichmentResultUseCase;
use product::application::cache::ProductCache;
use product::application::save_product::SaveProductCommand;
use product::application::workers::EnrichmentWorker;
use product::domain::messages::{EnrichmentRequest, EnrichmentResult};
use product::domain::value_objects::{Marketplace, Price};
use product::infrastructure::bootstrap::{build_product_operator, WorkerSettings};
use product::infrastructure::postgres::repositories::PostgresProductRepository;
use shared_kernel::application::ports::{MessageConsumer, MessageHandler, MessageProducer, MessageProducerExt};
use shared_kernel::application::workers::WorkerPool;
use shared_kernel::errors::DomainError;
use shared_kernel::infrastructure::amqp::factories::QueueTopology;
use shared_kernel::infrastructure::amqp::utils::AmqpTestContext;
use shared_kernel::infrastructure::redis::utils::RedisTestContext;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::common::setup_postgres_test_db;

#[tokio::test]
async fn test_save_enrich_and_read_through_real_infrastructure() {
    let pg = setup_postgres_test_db().await;
    let redis = RedisTestContext::builder().build().await;
    let amqp = AmqpTestContext::start().await;
    let settings = WorkerSettings::default();

    let operator = build_product_operator(pg.pool(), redis.cache(), amqp.context(), &settings)
        .await
        .unwrap();

    // 1. Création : une demande part sur la file des requêtes
    let cmd = SaveProductCommand::try_new(7, "https://etsy.com/listing/1", "Mug", None).unwrap();
    let id = operator.save_product(cmd).await.unwrap();

    let requests = amqp
        .context()
        .consumer(&settings.request_queue, "it-requests", WorkerPool::new(1))
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let capture: MessageHandler = Arc::new(move |payload: Vec<u8>| {
        let tx = tx.clone();
        async move {
            let _ = tx.send(payload);
            Ok(())
        }
        .boxed()
    });
    let requests = Arc::new(requests);
    let capturing = tokio::spawn({
        let requests = Arc::clone(&requests);
        async move { requests.consume(capture).await }
    });

    let raw = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("no enrichment request received")
        .unwrap();
    requests.stop();
    capturing.await.unwrap().unwrap();

    let request: EnrichmentRequest = serde_json::from_slice(&raw).unwrap();
    assert_eq!(request.id, id);
    assert_eq!(request.marketplace, Marketplace::Etsy);

    // 2. Première lecture : le cache est rempli
    assert_eq!(operator.product_by_id(id).await.unwrap().price(), Price::ZERO);

    // 3. Le scraper répond, le worker applique
    let results = amqp.context().producer(&settings.result_queue).await.unwrap();
    results
        .publish_json(&EnrichmentResult {
            id,
            price: Price::try_new(1999).unwrap(),
            in_stock: true,
        })
        .await
        .unwrap();

    let consumer = Arc::new(
        amqp.context()
            .consumer(&settings.result_queue, "it-results", WorkerPool::new(2))
            .await
            .unwrap(),
    );
    let use_case = ApplyEnrichmentResultUseCase::new(Arc::new(PostgresProductRepository::new(pg.pool())))
        .with_cache(ProductCache::new(redis.cache(), settings.cache_ttl));
    let worker = Arc::new(EnrichmentWorker::new(consumer.clone(), Arc::new(use_case)));
    let running = tokio::spawn({
        let worker = Arc::clone(&worker);
        async move { worker.start().await }
    });

    // 4. La lecture voit l'enrichissement (cache invalidé par le worker)
    let mut enriched = None;
    for _ in 0..50 {
        let product = operator.product_by_id(id).await.unwrap();
        if product.last_checked().is_some() {
            enriched = Some(product);
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    consumer.stop();
    running.await.unwrap().unwrap();

    let product = enriched.expect("enrichment was never applied");
    assert_eq!(product.price().value(), 1999);
    assert!(product.in_stock());

    // 5. Re-suivre la même URL : conflit
    let again = SaveProductCommand::try_new(7, "https://etsy.com/listing/1", "Mug", None).unwrap();
    assert!(matches!(
        operator.save_product(again).await,
        Err(DomainError::AlreadyExists { .. })
    ));
}

#[tokio::test]
async fn test_malformed_result_is_dead_lettered_after_ceiling() {
    let pg = setup_postgres_test_db().await;
    let amqp = AmqpTestContext::start().await;
    let queue = "parsed_queue_ceiling";

    // Consumer d'abord : il déclare la quorum queue et sa file de rebut
    let consumer = Arc::new(
        amqp.context()
            .consumer(queue, "it-ceiling", WorkerPool::new(1).with_max_redeliveries(Some(2)))
            .await
            .unwrap(),
    );
    let results = amqp
        .context()
        .producer_with_topology(queue, QueueTopology::DeadLettered)
        .await
        .unwrap();
    results.publish(b"not json").await.unwrap();

    let use_case = Arc::new(ApplyEnrichmentResultUseCase::new(Arc::new(
        PostgresProductRepository::new(pg.pool()),
    )));
    let inner = EnrichmentWorker::new(consumer.clone(), use_case).handler();
    let attempts = Arc::new(AtomicUsize::new(0));
    let counting: MessageHandler = {
        let attempts = Arc::clone(&attempts);
        Arc::new(move |payload: Vec<u8>| {
            attempts.fetch_add(1, Ordering::SeqCst);
            inner(payload)
        })
    };
    let running = tokio::spawn({
        let consumer = Arc::clone(&consumer);
        async move { consumer.consume(counting).await }
    });

    // Le message rejeté atterrit sur `<file>.dlq`
    let dead_letters = Arc::new(
        amqp.context()
            .consumer(&QueueTopology::dead_letter_queue(queue), "it-dlq", WorkerPool::new(1))
            .await
            .unwrap(),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let capture: MessageHandler = Arc::new(move |payload: Vec<u8>| {
        let tx = tx.clone();
        async move {
            let _ = tx.send(payload);
            Ok(())
        }
        .boxed()
    });
    let draining = tokio::spawn({
        let dead_letters = Arc::clone(&dead_letters);
        async move { dead_letters.consume(capture).await }
    });

    let dead = tokio::time::timeout(Duration::from_secs(15), rx.recv())
        .await
        .expect("poison message never reached the dead-letter queue")
        .unwrap();
    assert_eq!(dead, b"not json".to_vec());

    // Plus aucune re-livraison après le rejet définitif
    tokio::time::sleep(Duration::from_millis(500)).await;
    consumer.stop();
    dead_letters.stop();
    running.await.unwrap().unwrap();
    draining.await.unwrap().unwrap();

    // 1 livraison + 2 re-livraisons
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}
