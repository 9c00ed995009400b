use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub gateway_url: String,
    pub gateway_api_key: Option<String>,
    pub poll_interval_secs: u64,
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            gateway_url: env::var("GATEWAY_URL")
                .unwrap_or_else(|_| "https://nashapi-buckpay.squareweb.app".to_string()),
            gateway_api_key: env::var("GATEWAY_API_KEY").ok().filter(|key| !key.is_empty()),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .unwrap_or(7),
            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        }
    }
}
