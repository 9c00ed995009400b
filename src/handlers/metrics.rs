use axum::{extract::State, response::Json};

use crate::app::AppState;

pub async fn get_metrics(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "charges_created": state.metrics.charges_created(),
        "payments_confirmed": state.metrics.payments_confirmed(),
        "payments_failed": state.metrics.payments_failed(),
        "active_sessions": state.sessions.active_sessions(),
        "cart_items": state.cart.view().item_count,
    }))
}
