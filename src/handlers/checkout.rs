use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{error, info};

use crate::app::AppState;
use crate::models::checkout::{
    create_error_message, normalize, status_error_message, ChargePayload, ChargeRequest,
};
use crate::services::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(&'static str),
    // repassa o status do gateway junto com a mensagem extraida
    #[error("{message}")]
    Gateway {
        status: u16,
        message: String,
        details: Option<Value>,
        sent: Option<ChargePayload>,
    },
    #[error("Erro interno do servidor")]
    Internal,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            RelayError::Gateway {
                status,
                message,
                details,
                sent,
            } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let mut body = Map::new();
                body.insert("error".to_string(), Value::String(message));
                if let Some(details) = details {
                    body.insert("details".to_string(), details);
                }
                if let Some(sent) = sent {
                    body.insert(
                        "sent".to_string(),
                        serde_json::to_value(&sent).unwrap_or(Value::Null),
                    );
                }
                (status, Json(Value::Object(body))).into_response()
            }
            RelayError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Erro interno do servidor" })),
            )
                .into_response(),
        }
    }
}

pub async fn create_checkout(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, RelayError> {
    let request: ChargeRequest = serde_json::from_value(body)
        .map_err(|_| RelayError::Validation("Campos obrigatorios ausentes"))?;
    let payload = normalize(request).map_err(RelayError::Validation)?;

    info!("Forwarding charge creation for {} centavos", payload.amount);

    match state.gateway.create_charge(&payload).await {
        // resposta do gateway segue crua para o caller
        Ok(body) => Ok(Json(body)),
        Err(GatewayError::Rejected { status, body }) => Err(RelayError::Gateway {
            status,
            message: create_error_message(&body),
            details: Some(body),
            sent: Some(payload),
        }),
        Err(GatewayError::Unavailable(reason)) => {
            error!("Checkout create error: {}", reason);
            Err(RelayError::Internal)
        }
    }
}

pub async fn checkout_status(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<Value>, RelayError> {
    if external_id.trim().is_empty() {
        return Err(RelayError::Validation("external_id ausente"));
    }

    match state.gateway.charge_status(&external_id).await {
        Ok(body) => Ok(Json(body)),
        Err(GatewayError::Rejected { status, body }) => Err(RelayError::Gateway {
            status,
            message: status_error_message(&body),
            details: None,
            sent: None,
        }),
        Err(GatewayError::Unavailable(reason)) => {
            error!("Checkout status error: {}", reason);
            Err(RelayError::Internal)
        }
    }
}
