use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::services::cart_store::CartStore;
use crate::services::checkout_session::CheckoutSession;
use crate::services::gateway::PixGateway;
use crate::services::metrics::CheckoutMetrics;

pub struct SessionManager {
    sessions: DashMap<Uuid, Arc<CheckoutSession>>,
    gateway: Arc<dyn PixGateway>,
    cart: Arc<CartStore>,
    metrics: Arc<CheckoutMetrics>,
    poll_interval: Duration,
}

impl SessionManager {
    pub fn new(
        gateway: Arc<dyn PixGateway>,
        cart: Arc<CartStore>,
        metrics: Arc<CheckoutMetrics>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            gateway,
            cart,
            metrics,
            poll_interval,
        }
    }

    // Cada abertura ganha um estado zerado com o total corrente do carrinho
    pub fn open(&self) -> Arc<CheckoutSession> {
        let session = CheckoutSession::new(
            self.cart.total_cents(),
            self.cart.product_name(),
            Arc::clone(&self.gateway),
            Arc::clone(&self.cart),
            Arc::clone(&self.metrics),
            self.poll_interval,
        );
        info!("Checkout session {} opened", session.id());
        self.sessions.insert(session.id(), Arc::clone(&session));
        session
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<CheckoutSession>> {
        self.sessions.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn close(&self, id: Uuid) -> bool {
        match self.sessions.remove(&id) {
            Some((_, session)) => {
                session.close();
                true
            }
            None => false,
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}
