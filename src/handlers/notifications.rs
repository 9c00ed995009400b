use axum::response::Json;

use crate::services::notifications::{self, PurchaseNotification};

pub async fn sample_notification() -> Json<PurchaseNotification> {
    Json(notifications::sample())
}
