// backend/services/product/refresh-scheduler/src/main.rs

use product::infrastructure::bootstrap::run_refresh_scheduler;
use shared_kernel::errors::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    run_refresh_scheduler().await
}
