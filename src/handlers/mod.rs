pub mod cart;
pub mod checkout;
pub mod metrics;
pub mod notifications;
pub mod sessions;
