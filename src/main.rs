mod app;
mod handlers;
mod models;
mod services;
mod utils;

use std::sync::Arc;
use std::time::Duration;

use app::{config::Config, AppState};
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use services::{BuckpayGateway, CartStore, CheckoutMetrics, PixGateway, SessionManager};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    info!(
        "Starting Painel do Uriel checkout server on port {}",
        config.server_port
    );

    let cart = Arc::new(CartStore::new());
    let gateway: Arc<dyn PixGateway> = Arc::new(BuckpayGateway::new(&config));
    let metrics = Arc::new(CheckoutMetrics::new());
    let sessions = Arc::new(SessionManager::new(
        Arc::clone(&gateway),
        Arc::clone(&cart),
        Arc::clone(&metrics),
        Duration::from_secs(config.poll_interval_secs),
    ));

    let state = AppState {
        cart,
        gateway,
        sessions,
        metrics,
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(handlers::metrics::get_metrics))
        .route("/api/products", get(handlers::cart::list_products))
        .route("/api/cart", get(handlers::cart::get_cart))
        .route("/api/cart/items", post(handlers::cart::add_item))
        .route(
            "/api/cart/items/:id",
            axum::routing::patch(handlers::cart::update_item).delete(handlers::cart::remove_item),
        )
        .route(
            "/api/cart/coupon",
            post(handlers::cart::apply_coupon).delete(handlers::cart::remove_coupon),
        )
        .route("/api/cart/close", post(handlers::cart::close_cart))
        .route("/api/checkout/create", post(handlers::checkout::create_checkout))
        .route(
            "/api/checkout/status/:external_id",
            get(handlers::checkout::checkout_status),
        )
        .route("/api/checkout/session", post(handlers::sessions::open_session))
        .route(
            "/api/checkout/session/:id",
            get(handlers::sessions::get_session).delete(handlers::sessions::close_session),
        )
        .route(
            "/api/checkout/session/:id/submit",
            post(handlers::sessions::submit_session),
        )
        .route(
            "/api/checkout/session/:id/copy",
            post(handlers::sessions::copy_session),
        )
        .route(
            "/api/checkout/session/:id/back",
            post(handlers::sessions::back_session),
        )
        .route(
            "/api/checkout/session/:id/retry",
            post(handlers::sessions::retry_session),
        )
        .route(
            "/api/notifications/sample",
            get(handlers::notifications::sample_notification),
        )
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    info!("Shutdown signal received");
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}
