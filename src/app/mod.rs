pub mod config;

use std::sync::Arc;

use crate::services::cart_store::CartStore;
use crate::services::gateway::PixGateway;
use crate::services::metrics::CheckoutMetrics;
use crate::services::session_manager::SessionManager;

#[derive(Clone)]
pub struct AppState {
    pub cart: Arc<CartStore>,
    pub gateway: Arc<dyn PixGateway>,
    pub sessions: Arc<SessionManager>,
    pub metrics: Arc<CheckoutMetrics>,
}
