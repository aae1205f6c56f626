// backend/services/product/enrichment-worker/src/main.rs

use product::infrastructure::bootstrap::run_enrichment_worker;
use shared_kernel::errors::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    run_enrichment_worker().await
}
