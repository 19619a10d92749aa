// backend/services/reservation/workers/notification-worker/src/main.rs

use std::sync::Arc;

use reservation::application::consumers::ReservationNotifier;
use reservation::infrastructure::notifications::LogNotificationSender;
use shared_kernel::errors::AppResult;
use shared_kernel::infrastructure::bootstrap::run_effect_worker;

#[tokio::main]
async fn main() -> AppResult<()> {
    let notifier = Arc::new(ReservationNotifier::new(Arc::new(LogNotificationSender)));

    run_effect_worker("Reservation", "reservation.events", notifier).await
}
