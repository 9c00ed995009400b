use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

use crate::app::config::Config;
use crate::models::checkout::ChargePayload;

#[derive(Debug, Error)]
pub enum GatewayError {
    // o corpo segue intacto para o caller extrair a mensagem
    #[error("gateway returned HTTP {status}")]
    Rejected { status: u16, body: Value },
    #[error("gateway unreachable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PixGateway: Send + Sync {
    async fn create_charge(&self, payload: &ChargePayload) -> Result<Value, GatewayError>;
    async fn charge_status(&self, external_id: &str) -> Result<Value, GatewayError>;
}

pub struct BuckpayGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BuckpayGateway {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
            api_key: config.gateway_api_key.clone(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl PixGateway for BuckpayGateway {
    async fn create_charge(&self, payload: &ChargePayload) -> Result<Value, GatewayError> {
        let url = format!("{}/checkout/create", self.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Charge creation request failed: {}", e);
                GatewayError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        // corpo sem JSON vira objeto vazio, como na criacao original
        let body = response
            .json::<Value>()
            .await
            .unwrap_or_else(|_| Value::Object(Map::new()));

        if status.is_success() {
            Ok(body)
        } else {
            warn!("Gateway rejected charge creation with HTTP {}", status);
            Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn charge_status(&self, external_id: &str) -> Result<Value, GatewayError> {
        let url = format!("{}/checkout/status/{}", self.base_url, external_id);

        let response = self
            .authorize(self.client.get(&url))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
