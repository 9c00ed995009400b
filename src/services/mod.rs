pub mod cart_store;
pub mod checkout_session;
pub mod gateway;
pub mod metrics;
pub mod notifications;
pub mod session_manager;

pub use cart_store::CartStore;
pub use gateway::{BuckpayGateway, PixGateway};
pub use metrics::CheckoutMetrics;
pub use session_manager::SessionManager;
