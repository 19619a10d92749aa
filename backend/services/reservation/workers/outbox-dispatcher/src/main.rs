// backend/services/reservation/workers/outbox-dispatcher/src/main.rs

use shared_kernel::errors::AppResult;
use shared_kernel::infrastructure::bootstrap::run_outbox_dispatcher;

#[tokio::main]
async fn main() -> AppResult<()> {
    run_outbox_dispatcher("Reservation").await
}
